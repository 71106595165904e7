use crate::domain::command_queue::Command;
use crate::interface_adapters::handlers::verify_secret;
use crate::interface_adapters::http::ApiError;
use crate::interface_adapters::protocol::{CommandRequest, PollQuery};
use crate::interface_adapters::state::AppState;
use crate::use_cases::publisher::publish_once;
use axum::http::StatusCode;
use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;
use std::sync::Arc;

// Append a command to the queue. 200 on success, 403 on bad secret.
pub async fn enqueue_command(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> Result<StatusCode, ApiError> {
    verify_secret(&state, request.secret.as_deref())?;

    let (command, args) = coerce_command(request.command, request.args);
    enqueue(&state, command, args).await?;
    Ok(StatusCode::OK)
}

// Enqueue like /command, then nudge an immediate recap publish. Rejected
// with 503 before any mutation when no display channel is configured.
pub async fn recap_trigger(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> Result<StatusCode, ApiError> {
    verify_secret(&state, request.secret.as_deref())?;

    let Some(sink) = state.recap_sink.clone() else {
        return Err(ApiError::NotReady("recap publisher not configured"));
    };

    let (command, args) = coerce_command(request.command, request.args);
    enqueue(&state, command, args).await?;

    // Fire-and-forget: the response never waits on the outbound publish.
    tokio::spawn(publish_once(
        Arc::clone(&state.board),
        Arc::clone(&state.feed),
        sink,
    ));

    Ok(StatusCode::OK)
}

// Drain every pending command for the polling consumer.
pub async fn poll_commands(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PollQuery>,
) -> Result<Json<Vec<Command>>, ApiError> {
    verify_secret(&state, query.secret.as_deref())?;

    let drained = {
        let mut commands = state.commands.lock().await;
        commands.drain_all()
    };
    Ok(Json(drained))
}

async fn enqueue(state: &AppState, command: String, args: Vec<Value>) -> Result<(), ApiError> {
    let mut commands = state.commands.lock().await;
    commands.enqueue(command, args).map_err(|error| {
        tracing::error!(%error, "failed to persist enqueued command");
        ApiError::Storage
    })?;
    Ok(())
}

// Producers get best-effort enqueueing: a non-string command is stringified
// and anything that is not an array of args becomes no args. Shape issues
// never hard-fail, only auth does.
fn coerce_command(command: Option<Value>, args: Option<Value>) -> (String, Vec<Value>) {
    let command = match command {
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => String::new(),
    };
    let args = match args {
        Some(Value::Array(args)) => args,
        _ => Vec::new(),
    };
    (command, args)
}
