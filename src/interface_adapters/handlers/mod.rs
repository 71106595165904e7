pub mod board;
pub mod commands;
pub mod kills;

use crate::domain::current_epoch_seconds;
use crate::interface_adapters::http::ApiError;
use crate::interface_adapters::state::AppState;

// Exact string equality against the configured secret. A missing secret is
// the same failure as a wrong one; no mutation may happen past a failure.
pub(crate) fn verify_secret(state: &AppState, provided: Option<&str>) -> Result<(), ApiError> {
    match provided {
        Some(secret) if secret == state.secret => Ok(()),
        _ => Err(ApiError::Forbidden),
    }
}

// Apply the replay heuristic when the producer sent a nonce or timestamp.
// Sending one without the other is a shape error; a failed check is
// indistinguishable from bad auth on the wire.
pub(crate) async fn check_replay(
    state: &AppState,
    nonce: Option<u64>,
    timestamp: Option<u64>,
) -> Result<(), ApiError> {
    match (nonce, timestamp) {
        (None, None) => Ok(()),
        (Some(nonce), Some(timestamp)) => {
            let mut guard = state.replay.lock().await;
            guard
                .check_and_advance(nonce, timestamp, current_epoch_seconds())
                .map_err(|_| ApiError::Forbidden)
        }
        _ => Err(ApiError::BadRequest("nonce and timestamp must be sent together")),
    }
}
