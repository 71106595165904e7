use crate::domain::kill_feed::Event;
use crate::interface_adapters::handlers::{check_replay, verify_secret};
use crate::interface_adapters::http::ApiError;
use crate::interface_adapters::protocol::{DeathRequest, KillRequest, SecretRequest};
use crate::interface_adapters::state::AppState;
use axum::http::StatusCode;
use axum::{Json, extract::State};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;

// Record a kill-feed event and push the updated feed to subscribers.
pub async fn record_kill(
    State(state): State<Arc<AppState>>,
    Json(request): Json<KillRequest>,
) -> Result<Json<Event>, ApiError> {
    verify_secret(&state, request.secret.as_deref())?;
    check_replay(&state, request.nonce, request.timestamp).await?;

    let victim = match request.victim.as_deref() {
        Some(victim) if !victim.trim().is_empty() => victim,
        _ => return Err(ApiError::BadRequest("victim is required")),
    };

    let event = {
        let mut feed = state.feed.lock().await;
        let mut rng = SmallRng::from_os_rng();
        feed.record(&mut rng, victim, request.killer.as_deref())
    };

    broadcast_feed(&state).await;
    Ok(Json(event))
}

// Current feed, newest-first. Unauthenticated: viewers poll this.
pub async fn list_kills(State(state): State<Arc<AppState>>) -> Json<Vec<Event>> {
    let feed = state.feed.lock().await;
    Json(feed.snapshot())
}

// Mark a tribute dead and record the matching feed event.
pub async fn record_death(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DeathRequest>,
) -> Result<Json<Event>, ApiError> {
    verify_secret(&state, request.secret.as_deref())?;

    let Some(id) = request.id else {
        return Err(ApiError::BadRequest("id is required"));
    };
    let name = match request.name.as_deref() {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(ApiError::BadRequest("name is required")),
    };

    {
        let mut dead = state.dead.lock().await;
        dead.insert(id);
    }

    let event = {
        let mut feed = state.feed.lock().await;
        let mut rng = SmallRng::from_os_rng();
        feed.record(&mut rng, name, request.killer.as_deref())
    };

    broadcast_feed(&state).await;
    Ok(Json(event))
}

// Clear the dead set and the feed, e.g. between matches.
pub async fn reset_dead(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SecretRequest>,
) -> Result<StatusCode, ApiError> {
    verify_secret(&state, request.secret.as_deref())?;

    {
        let mut dead = state.dead.lock().await;
        dead.clear();
    }
    {
        let mut feed = state.feed.lock().await;
        feed.reset();
    }

    broadcast_feed(&state).await;
    Ok(StatusCode::OK)
}

// Push the full updated feed to every live subscriber. Best-effort: a feed
// with no subscribers or a lagging one never affects the mutation.
pub(crate) async fn broadcast_feed(state: &AppState) {
    let snapshot = {
        let feed = state.feed.lock().await;
        feed.snapshot()
    };
    match serde_json::to_string(&snapshot) {
        Ok(payload) => {
            let _ = state.feed_tx.send(payload);
        }
        Err(error) => tracing::warn!(%error, "failed to serialize kill feed"),
    }
}
