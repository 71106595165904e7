use crate::domain::kill_feed::KillFeed;
use crate::domain::live_state::SponsorBoard;
use crate::domain::replay::ReplayGuard;
use crate::use_cases::command_relay::CommandRelay;
use crate::use_cases::publisher::RecapSink;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};

// Which endpoint groups this relay instance mounts. One configurable binary
// replaces the old per-deployment relay variants.
#[derive(Debug, Clone, Copy)]
pub struct RelayFeatures {
    pub commands: bool,
    pub kills: bool,
    pub board: bool,
}

impl Default for RelayFeatures {
    fn default() -> Self {
        Self {
            commands: true,
            kills: true,
            board: true,
        }
    }
}

// Shared application state for the HTTP handlers.
//
// Each structure has its own lock covering the full read-modify-write, so
// an enqueue racing a drain can never lose or duplicate a command.
pub struct AppState {
    pub secret: String,
    pub features: RelayFeatures,
    pub commands: Arc<Mutex<CommandRelay>>,
    pub feed: Arc<Mutex<KillFeed>>,
    // Serialized kill-feed snapshots pushed to /ws subscribers.
    pub feed_tx: broadcast::Sender<String>,
    pub dead: Arc<Mutex<HashSet<u64>>>,
    pub board: Arc<Mutex<SponsorBoard>>,
    pub replay: Arc<Mutex<ReplayGuard>>,
    // Present only when an outbound display channel is configured.
    pub recap_sink: Option<Arc<dyn RecapSink>>,
}
