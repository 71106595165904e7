// Framework bootstrap for the relay runtime.

use crate::domain::kill_feed::KillFeed;
use crate::domain::live_state::SponsorBoard;
use crate::domain::replay::ReplayGuard;
use crate::frameworks::config;
use crate::frameworks::storage::QueueStorage;
use crate::interface_adapters::clients::discord::DiscordWebhook;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{AppState, RelayFeatures};
use crate::use_cases::command_relay::CommandRelay;
use crate::use_cases::publisher::{RecapSink, recap_task};

use std::collections::HashSet;
use std::io::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, broadcast};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Everything the relay needs to serve, resolved before binding.
#[derive(Debug, Clone)]
pub struct RelayOptions {
    pub secret: String,
    pub features: RelayFeatures,
    pub queue_file: Option<PathBuf>,
    pub recap: Option<RecapOptions>,
}

#[derive(Debug, Clone)]
pub struct RecapOptions {
    pub webhook_url: String,
    pub interval: Duration,
    pub timeout: Duration,
}

impl RelayOptions {
    pub fn from_env() -> Result<Self> {
        let secret = config::shared_secret()
            .ok_or_else(|| std::io::Error::other("SECRET must be set"))?;

        let recap = config::recap_webhook_url().map(|webhook_url| RecapOptions {
            webhook_url,
            interval: config::recap_interval(),
            timeout: config::recap_timeout(),
        });

        Ok(Self {
            secret,
            features: config::features(),
            queue_file: config::queue_file(),
            recap,
        })
    }
}

pub async fn run(listener: tokio::net::TcpListener, options: RelayOptions) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(&options)?;

    // The recap loop runs independently of request handling; handlers never
    // await it.
    if let (Some(sink), Some(recap)) = (state.recap_sink.clone(), &options.recap) {
        tokio::spawn(recap_task(
            Arc::clone(&state.board),
            Arc::clone(&state.feed),
            sink,
            recap.interval,
        ));
    }

    let app = routes::app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let options = RelayOptions::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
    })?;

    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, options).await
}

fn build_state(options: &RelayOptions) -> Result<Arc<AppState>> {
    let commands = match &options.queue_file {
        Some(path) => CommandRelay::with_storage(QueueStorage::new(path)),
        None => CommandRelay::in_memory(),
    };

    let recap_sink: Option<Arc<dyn RecapSink>> = match &options.recap {
        Some(recap) => {
            let webhook = DiscordWebhook::new(recap.webhook_url.clone(), recap.timeout)
                .map_err(|e| {
                    std::io::Error::other(format!("failed to initialize webhook client: {e}"))
                })?;
            tracing::debug!(
                interval_secs = recap.interval.as_secs(),
                timeout_ms = recap.timeout.as_millis(),
                "recap publisher configured"
            );
            Some(Arc::new(webhook))
        }
        None => None,
    };

    let (feed_tx, _feed_rx) = broadcast::channel::<String>(config::FEED_BROADCAST_CAPACITY);

    Ok(Arc::new(AppState {
        secret: options.secret.clone(),
        features: options.features,
        commands: Arc::new(Mutex::new(commands)),
        feed: Arc::new(Mutex::new(KillFeed::new())),
        feed_tx,
        dead: Arc::new(Mutex::new(HashSet::new())),
        board: Arc::new(Mutex::new(SponsorBoard::new())),
        replay: Arc::new(Mutex::new(ReplayGuard::new())),
        recap_sink,
    }))
}
