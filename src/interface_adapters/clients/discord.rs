// Thin wrapper around reqwest for the Discord webhook display channel.

use crate::use_cases::publisher::{Recap, RecapSink};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::fmt;
use std::time::Duration;

#[derive(Clone)]
pub struct DiscordWebhook {
    http: Client,
    webhook_url: String,
}

#[derive(Debug)]
pub enum WebhookError {
    Transport(reqwest::Error),
    Upstream { status: StatusCode },
}

impl fmt::Display for WebhookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookError::Transport(err) => write!(f, "webhook transport error: {err}"),
            WebhookError::Upstream { status } => write!(f, "webhook upstream error {status}"),
        }
    }
}

impl std::error::Error for WebhookError {}

impl DiscordWebhook {
    // The timeout bounds every delivery attempt; a slow channel must never
    // hold up the publish loop longer than this.
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            webhook_url: webhook_url.into(),
        })
    }
}

#[async_trait]
impl RecapSink for DiscordWebhook {
    async fn publish(
        &self,
        recap: &Recap,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let body = json!({ "content": render_recap(recap) });

        let res = self
            .http
            .post(&self.webhook_url)
            .json(&body)
            .send()
            .await
            .map_err(WebhookError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(Box::new(WebhookError::Upstream { status }));
        }
        Ok(())
    }
}

// Plain-text recap. Richer embed composition lives in the bot, not here.
fn render_recap(recap: &Recap) -> String {
    let mut lines = vec![format!(
        "🏹 Arena recap — {} of {} tributes alive",
        recap.alive, recap.total
    )];

    if !recap.top_sponsors.is_empty() {
        lines.push("Top sponsors:".to_string());
        for (rank, (name, votes)) in recap.top_sponsors.iter().enumerate() {
            lines.push(format!("{}. {name} — {votes}💎", rank + 1));
        }
    }

    if !recap.recent_events.is_empty() {
        lines.push("Latest events:".to_string());
        for text in &recap.recent_events {
            lines.push(format!("• {text}"));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recap_renders_leaderboard_and_events_in_order() {
        let recap = Recap {
            alive: 3,
            total: 12,
            top_sponsors: vec![("Katniss".to_string(), 9), ("Peeta".to_string(), 4)],
            recent_events: vec!["Marvel died.".to_string()],
        };

        let text = render_recap(&recap);
        assert!(text.starts_with("🏹 Arena recap — 3 of 12 tributes alive"));
        assert!(text.contains("1. Katniss — 9💎"));
        assert!(text.contains("2. Peeta — 4💎"));
        assert!(text.contains("• Marvel died."));
    }

    #[test]
    fn empty_leaderboard_renders_header_only() {
        let recap = Recap {
            alive: 0,
            total: 0,
            top_sponsors: vec![],
            recent_events: vec![],
        };

        assert_eq!(render_recap(&recap), "🏹 Arena recap — 0 of 0 tributes alive");
    }
}
