use crate::interface_adapters::handlers::{check_replay, verify_secret};
use crate::interface_adapters::http::ApiError;
use crate::interface_adapters::protocol::{StateRequest, VoteRequest, VoteResponse};
use crate::interface_adapters::state::AppState;
use axum::http::StatusCode;
use axum::{Json, extract::State};
use serde_json::Value;
use std::sync::Arc;

// Wholesale-replace the live snapshot. Seeds the vote ledger for names that
// appear for the first time.
pub async fn replace_state(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StateRequest>,
) -> Result<StatusCode, ApiError> {
    verify_secret(&state, request.secret.as_deref())?;
    check_replay(&state, request.nonce, request.timestamp).await?;

    let Some(snapshot) = request.state else {
        return Err(ApiError::BadRequest("state is required"));
    };

    let mut board = state.board.lock().await;
    board.replace(snapshot);
    Ok(StatusCode::OK)
}

// Latest snapshot, verbatim. Unauthenticated: viewers poll this.
pub async fn read_state(State(state): State<Arc<AppState>>) -> Json<Vec<Value>> {
    let board = state.board.lock().await;
    Json(board.read().to_vec())
}

// Add one sponsor vote and return the new count.
pub async fn cast_vote(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, ApiError> {
    let name = match request.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(ApiError::BadRequest("name is required")),
    };

    let votes = {
        let mut board = state.board.lock().await;
        board.cast_vote(&name)
    };

    Ok(Json(VoteResponse { name, votes }))
}
