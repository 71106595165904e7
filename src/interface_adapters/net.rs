// Kill-feed push channel.
//
// Viewers connect to /ws and receive the full serialized feed immediately,
// then again after every mutating feed operation. The channel is read-only
// from the client's side; inbound frames are ignored.

use crate::interface_adapters::state::AppState;
use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    // Subscribe before snapshotting so no update landing between the
    // snapshot and the loop is missed.
    let mut feed_rx = state.feed_tx.subscribe();

    let Some(initial) = serialize_feed(&state).await else {
        return;
    };
    if socket.send(Message::Text(initial.into())).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            update = feed_rx.recv() => match update {
                Ok(payload) => {
                    if socket.send(Message::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    // A slow viewer missed intermediate snapshots; the
                    // current one supersedes them all.
                    tracing::debug!(skipped, "feed subscriber lagged, resyncing");
                    let Some(current) = serialize_feed(&state).await else {
                        break;
                    };
                    if socket.send(Message::Text(current.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
            },
            inbound = socket.recv() => match inbound {
                // Viewers only read; drop anything they send.
                Some(Ok(_)) => {}
                _ => break,
            },
        }
    }
}

async fn serialize_feed(state: &AppState) -> Option<String> {
    let snapshot = {
        let feed = state.feed.lock().await;
        feed.snapshot()
    };
    match serde_json::to_string(&snapshot) {
        Ok(payload) => Some(payload),
        Err(error) => {
            tracing::warn!(%error, "failed to serialize kill feed");
            None
        }
    }
}
