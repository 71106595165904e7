use serde_json::Value;
use std::collections::HashMap;

/// Live tribute snapshot plus the sponsor vote ledger.
///
/// The snapshot is replaced wholesale by the game tick; no merging, no
/// history. Vote counts only ever go up and are seeded lazily the first time
/// a tribute name shows up in a replacement.
#[derive(Debug, Default)]
pub struct SponsorBoard {
    tributes: Vec<Value>,
    votes: HashMap<String, u64>,
}

impl SponsorBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored snapshot with `state` verbatim.
    ///
    /// Any tribute name not yet in the ledger is seeded from the record's
    /// incoming `votes` field (0 when absent). Names already voted on keep
    /// their current count.
    pub fn replace(&mut self, state: Vec<Value>) {
        for record in &state {
            let Some(name) = record.get("name").and_then(Value::as_str) else {
                continue;
            };
            if !self.votes.contains_key(name) {
                let initial = record.get("votes").and_then(Value::as_u64).unwrap_or(0);
                self.votes.insert(name.to_string(), initial);
            }
        }
        self.tributes = state;
    }

    // Latest replacement, verbatim.
    pub fn read(&self) -> &[Value] {
        &self.tributes
    }

    /// Add one sponsor vote for `name` and return the new count.
    ///
    /// Unknown names start at zero. There is no per-voter deduplication and
    /// no upper bound; that matches the deployed behavior.
    pub fn cast_vote(&mut self, name: &str) -> u64 {
        let count = self.votes.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn vote_count(&self, name: &str) -> u64 {
        self.votes.get(name).copied().unwrap_or(0)
    }

    // Vote counts sorted highest-first, ties broken by name for stable output.
    pub fn leaderboard(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .votes
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}
