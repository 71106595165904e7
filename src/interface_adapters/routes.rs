use crate::interface_adapters::handlers::board::{cast_vote, read_state, replace_state};
use crate::interface_adapters::handlers::commands::{
    enqueue_command, poll_commands, recap_trigger,
};
use crate::interface_adapters::handlers::kills::{
    list_kills, record_death, record_kill, reset_dead,
};
use crate::interface_adapters::net::ws_handler;
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

// Build the HTTP router. Endpoint groups are mounted only when their
// capability flag is set; everything else 404s.
pub fn app(state: Arc<AppState>) -> Router {
    let features = state.features;
    let mut router = Router::new();

    if features.commands {
        router = router
            .route("/command", post(enqueue_command))
            .route("/recap-trigger", post(recap_trigger))
            .route("/poll", get(poll_commands));
    }

    if features.kills {
        router = router
            .route("/kill", post(record_kill))
            .route("/kills", get(list_kills))
            .route("/death", post(record_death))
            .route("/reset-dead", post(reset_dead))
            .route("/ws", get(ws_handler));
    }

    if features.board {
        router = router
            .route("/state", post(replace_state).get(read_state))
            // Older game scripts still push under /map.
            .route("/map", post(replace_state).get(read_state))
            .route("/vote", post(cast_vote));
    }

    router.with_state(state)
}
