use crate::domain::current_epoch_seconds;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;

// A pending command waiting to be picked up by the polling consumer.
// Immutable once enqueued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub command: String,
    #[serde(default)]
    pub args: Vec<Value>,
    pub enqueued_at: u64,
}

/// FIFO buffer of pending commands.
///
/// Producers append to the tail; the single polling consumer takes the whole
/// buffer at once with [`CommandQueue::drain_all`]. Duplicates are allowed.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    // Create a new queue with no pending commands.
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    // Rebuild a queue from previously persisted commands, preserving order.
    pub fn from_commands(commands: Vec<Command>) -> Self {
        Self {
            pending: commands.into(),
        }
    }

    // Append a command to the tail and return the stored record.
    pub fn enqueue(&mut self, command: String, args: Vec<Value>) -> Command {
        let entry = Command {
            command,
            args,
            enqueued_at: current_epoch_seconds(),
        };
        self.pending.push_back(entry.clone());
        entry
    }

    /// Take every pending command in insertion order, leaving the queue empty.
    ///
    /// A command is never both returned and retained: callers observing the
    /// result own those commands exclusively.
    pub fn drain_all(&mut self) -> Vec<Command> {
        self.pending.drain(..).collect()
    }

    // Current contents in insertion order, without consuming them.
    pub fn pending(&self) -> Vec<Command> {
        self.pending.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn drain_returns_commands_in_insertion_order_and_empties_the_queue() {
        let mut queue = CommandQueue::new();
        queue.enqueue("DAY".to_string(), vec![]);
        queue.enqueue("NIGHT".to_string(), vec![json!(5)]);
        queue.enqueue("FEAST".to_string(), vec![json!("cornucopia"), json!(true)]);

        let drained = queue.drain_all();

        assert_eq!(drained.len(), 3);
        assert_eq!(drained[0].command, "DAY");
        assert_eq!(drained[0].args, Vec::<serde_json::Value>::new());
        assert_eq!(drained[1].command, "NIGHT");
        assert_eq!(drained[1].args, vec![json!(5)]);
        assert_eq!(drained[2].command, "FEAST");
        assert!(queue.is_empty());
    }

    #[test]
    fn drain_on_empty_queue_returns_empty_sequence() {
        let mut queue = CommandQueue::new();
        queue.enqueue("DAY".to_string(), vec![]);
        queue.drain_all();

        assert_eq!(queue.drain_all(), Vec::<Command>::new());
    }

    #[test]
    fn duplicate_commands_are_allowed() {
        let mut queue = CommandQueue::new();
        queue.enqueue("DAY".to_string(), vec![]);
        queue.enqueue("DAY".to_string(), vec![]);

        assert_eq!(queue.len(), 2);
        let drained = queue.drain_all();
        assert_eq!(drained[0].command, drained[1].command);
    }

    #[test]
    fn enqueue_after_drain_lands_in_the_next_drain() {
        let mut queue = CommandQueue::new();
        queue.enqueue("DAY".to_string(), vec![]);
        let first = queue.drain_all();
        queue.enqueue("NIGHT".to_string(), vec![]);
        let second = queue.drain_all();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].command, "NIGHT");
    }

    #[test]
    fn from_commands_restores_persisted_order() {
        let restored = CommandQueue::from_commands(vec![
            Command {
                command: "DAY".to_string(),
                args: vec![],
                enqueued_at: 1,
            },
            Command {
                command: "NIGHT".to_string(),
                args: vec![json!(5)],
                enqueued_at: 2,
            },
        ]);

        let drained = restored.pending();
        assert_eq!(drained[0].command, "DAY");
        assert_eq!(drained[1].command, "NIGHT");
    }

    #[test]
    fn command_serializes_with_camel_case_timestamp() {
        let command = Command {
            command: "DAY".to_string(),
            args: vec![],
            enqueued_at: 42,
        };

        let value = serde_json::to_value(&command).expect("expected json value");
        assert_eq!(value["command"], "DAY");
        assert_eq!(value["args"], json!([]));
        assert_eq!(value["enqueuedAt"], 42);
    }
}
