#[tokio::main]
async fn main() {
    // Delegate to the server framework entry point.
    if let Err(error) = relay_server::run_with_config().await {
        tracing::error!(%error, "relay exited");
        std::process::exit(1);
    }
}
