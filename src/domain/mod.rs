pub mod command_queue;
pub mod kill_feed;
pub mod live_state;
pub mod replay;

use std::time::{SystemTime, UNIX_EPOCH};

// Get the current time as epoch seconds.
pub(crate) fn current_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
