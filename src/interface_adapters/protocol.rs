use serde::{Deserialize, Serialize};
use serde_json::Value;

// Request payload for enqueueing a command.
//
// `command` and `args` are deliberately loose: producers send best-effort
// shapes and the handler coerces rather than rejects (only auth hard-fails).
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub command: Option<Value>,
    #[serde(default)]
    pub args: Option<Value>,
}

// Query parameters for the polling consumer.
#[derive(Debug, Deserialize)]
pub struct PollQuery {
    #[serde(default)]
    pub secret: Option<String>,
}

// Request payload for recording a kill-feed event.
#[derive(Debug, Deserialize)]
pub struct KillRequest {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub victim: Option<String>,
    #[serde(default)]
    pub killer: Option<String>,
    #[serde(default)]
    pub nonce: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<u64>,
}

// Request payload for marking a tribute dead.
#[derive(Debug, Deserialize)]
pub struct DeathRequest {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub killer: Option<String>,
}

// Request payload carrying only the shared secret.
#[derive(Debug, Deserialize)]
pub struct SecretRequest {
    #[serde(default)]
    pub secret: Option<String>,
}

// Request payload for a wholesale live-state replacement. Game variants
// send the snapshot under either `state` or `players`.
#[derive(Debug, Deserialize)]
pub struct StateRequest {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default, alias = "players")]
    pub state: Option<Vec<Value>>,
    #[serde(default)]
    pub nonce: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<u64>,
}

// Request payload for a sponsor vote.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub name: Option<String>,
}

// Response payload after a sponsor vote.
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub name: String,
    pub votes: u64,
}
