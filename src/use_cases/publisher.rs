// Periodic recap publishing to an external display channel.
//
// The publish loop is fire-and-forget: it never blocks request handling and
// a failed delivery is logged and dropped, never retried. State mutations
// are committed before any publish attempt and are never rolled back.

use crate::domain::kill_feed::KillFeed;
use crate::domain::live_state::SponsorBoard;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

// How many leaderboard rows and feed lines a recap carries.
const RECAP_TOP_SPONSORS: usize = 5;
const RECAP_RECENT_EVENTS: usize = 5;

// A point-in-time summary of the arena for the display channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Recap {
    pub alive: usize,
    pub total: usize,
    pub top_sponsors: Vec<(String, u64)>,
    pub recent_events: Vec<String>,
}

/// Outbound sink for recaps. Implementations own their timeout and failure
/// handling; the caller only logs.
#[async_trait]
pub trait RecapSink: Send + Sync {
    async fn publish(&self, recap: &Recap) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

// Build a recap from the current board and feed, or None when no live state
// has arrived yet.
pub async fn build_recap(
    board: &Mutex<SponsorBoard>,
    feed: &Mutex<KillFeed>,
) -> Option<Recap> {
    let (alive, total, mut top_sponsors) = {
        let board = board.lock().await;
        let tributes = board.read();
        if tributes.is_empty() {
            return None;
        }
        let alive = tributes
            .iter()
            .filter(|record| record.get("alive").and_then(|v| v.as_bool()).unwrap_or(false))
            .count();
        (alive, tributes.len(), board.leaderboard())
    };
    top_sponsors.truncate(RECAP_TOP_SPONSORS);

    let recent_events = {
        let feed = feed.lock().await;
        feed.snapshot()
            .into_iter()
            .take(RECAP_RECENT_EVENTS)
            .map(|event| event.text)
            .collect()
    };

    Some(Recap {
        alive,
        total,
        top_sponsors,
        recent_events,
    })
}

// One publish attempt. Empty state is a no-op; delivery failures are logged
// and dropped.
pub async fn publish_once(
    board: Arc<Mutex<SponsorBoard>>,
    feed: Arc<Mutex<KillFeed>>,
    sink: Arc<dyn RecapSink>,
) {
    let Some(recap) = build_recap(&board, &feed).await else {
        tracing::debug!("no live state yet, skipping recap");
        return;
    };

    if let Err(error) = sink.publish(&recap).await {
        tracing::warn!(%error, "recap publish failed");
    }
}

/// Background loop publishing a recap on a fixed interval.
pub async fn recap_task(
    board: Arc<Mutex<SponsorBoard>>,
    feed: Arc<Mutex<KillFeed>>,
    sink: Arc<dyn RecapSink>,
    period: Duration,
) {
    let mut interval = tokio::time::interval(period);
    // The first tick fires immediately; skip it so a fresh process does not
    // publish before the game has pushed any state.
    interval.tick().await;

    loop {
        interval.tick().await;
        publish_once(Arc::clone(&board), Arc::clone(&feed), Arc::clone(&sink)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingSink {
        published: Mutex<Vec<Recap>>,
        failures: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl RecapSink for RecordingSink {
        async fn publish(
            &self,
            recap: &Recap,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            if self.fail {
                self.failures.fetch_add(1, Ordering::Relaxed);
                return Err("sink offline".into());
            }
            self.published.lock().await.push(recap.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn publish_is_skipped_while_no_state_has_arrived() {
        let board = Arc::new(Mutex::new(SponsorBoard::new()));
        let feed = Arc::new(Mutex::new(KillFeed::new()));
        let sink = Arc::new(RecordingSink::default());

        publish_once(Arc::clone(&board), Arc::clone(&feed), sink.clone()).await;

        assert!(sink.published.lock().await.is_empty());
    }

    #[tokio::test]
    async fn recap_summarizes_board_and_recent_events() {
        let board = Arc::new(Mutex::new(SponsorBoard::new()));
        let feed = Arc::new(Mutex::new(KillFeed::new()));

        {
            let mut board = board.lock().await;
            board.replace(vec![
                json!({"name": "Katniss", "alive": true, "votes": 3}),
                json!({"name": "Peeta", "alive": true}),
                json!({"name": "Marvel", "alive": false}),
            ]);
        }
        {
            use rand::SeedableRng;
            let mut feed = feed.lock().await;
            let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
            feed.record(&mut rng, "Marvel", None);
        }

        let recap = build_recap(&board, &feed).await.expect("expected recap");
        assert_eq!(recap.alive, 2);
        assert_eq!(recap.total, 3);
        assert_eq!(recap.top_sponsors[0], ("Katniss".to_string(), 3));
        assert_eq!(recap.recent_events, vec!["Marvel died.".to_string()]);
    }

    #[tokio::test]
    async fn sink_failure_is_swallowed() {
        let board = Arc::new(Mutex::new(SponsorBoard::new()));
        let feed = Arc::new(Mutex::new(KillFeed::new()));
        {
            let mut board = board.lock().await;
            board.replace(vec![json!({"name": "Katniss", "alive": true})]);
        }

        let sink = Arc::new(RecordingSink {
            fail: true,
            ..RecordingSink::default()
        });

        // Must complete without panicking or retrying.
        publish_once(Arc::clone(&board), Arc::clone(&feed), sink.clone()).await;
        assert_eq!(sink.failures.load(Ordering::Relaxed), 1);
    }
}
