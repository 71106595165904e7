use crate::interface_adapters::state::RelayFeatures;
use std::path::PathBuf;
use std::{env, time::Duration};

// Runtime/server settings, all environment-driven.

pub fn http_port() -> u16 {
    env::var("RELAY_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10000)
}

// The shared secret every mutating producer must present. Required.
pub fn shared_secret() -> Option<String> {
    env::var("SECRET").ok().filter(|s| !s.is_empty())
}

// Optional file backing the command queue; unset means in-memory only.
pub fn queue_file() -> Option<PathBuf> {
    env::var("QUEUE_FILE")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

// Optional Discord webhook for the periodic recap; unset disables it.
pub fn recap_webhook_url() -> Option<String> {
    env::var("RECAP_WEBHOOK_URL").ok().filter(|s| !s.is_empty())
}

pub fn recap_interval() -> Duration {
    let seconds = env::var("RECAP_INTERVAL_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(10);
    Duration::from_secs(seconds)
}

pub fn recap_timeout() -> Duration {
    let millis = env::var("RECAP_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(1500);
    Duration::from_millis(millis)
}

// Comma-separated endpoint groups to mount, e.g. "commands,kills".
// Unset mounts everything.
pub fn features() -> RelayFeatures {
    let Ok(raw) = env::var("RELAY_FEATURES") else {
        return RelayFeatures::default();
    };

    let mut features = RelayFeatures {
        commands: false,
        kills: false,
        board: false,
    };
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token {
            "commands" => features.commands = true,
            "kills" => features.kills = true,
            "board" => features.board = true,
            other => tracing::warn!(feature = other, "unknown relay feature, ignoring"),
        }
    }
    features
}

pub const FEED_BROADCAST_CAPACITY: usize = 128;
