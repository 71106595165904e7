use crate::domain::command_queue::{Command, CommandQueue};
use crate::frameworks::storage::QueueStorage;
use serde_json::Value;
use std::io;

/// Command queue with optional write-through file persistence.
///
/// Every mutation rewrites the backing file before the caller sees a result,
/// so a crash after a successful enqueue cannot lose the command.
#[derive(Debug)]
pub struct CommandRelay {
    queue: CommandQueue,
    storage: Option<QueueStorage>,
}

impl CommandRelay {
    pub fn in_memory() -> Self {
        Self {
            queue: CommandQueue::new(),
            storage: None,
        }
    }

    // Restore the queue from storage; a corrupt or unreadable file logs a
    // warning and starts empty rather than refusing to boot.
    pub fn with_storage(storage: QueueStorage) -> Self {
        let queue = match storage.load() {
            Ok(commands) => {
                if !commands.is_empty() {
                    tracing::info!(
                        pending = commands.len(),
                        path = %storage.path().display(),
                        "restored persisted command queue"
                    );
                }
                CommandQueue::from_commands(commands)
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    path = %storage.path().display(),
                    "failed to load persisted queue, starting empty"
                );
                CommandQueue::new()
            }
        };

        Self {
            queue,
            storage: Some(storage),
        }
    }

    /// Append a command. The write-ahead-of-response discipline applies: a
    /// persistence failure is returned to the caller, though the in-memory
    /// mutation is kept (never rolled back).
    pub fn enqueue(&mut self, command: String, args: Vec<Value>) -> io::Result<Command> {
        let entry = self.queue.enqueue(command, args);
        self.persist()?;
        Ok(entry)
    }

    /// Take and clear every pending command.
    ///
    /// Unlike enqueue, a persistence failure here is logged and swallowed:
    /// the drained batch has already left the queue and failing the request
    /// would drop it on the floor.
    pub fn drain_all(&mut self) -> Vec<Command> {
        let drained = self.queue.drain_all();
        if let Err(error) = self.persist() {
            tracing::error!(%error, "failed to persist drained queue");
        }
        drained
    }

    pub fn pending(&self) -> Vec<Command> {
        self.queue.pending()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn persist(&self) -> io::Result<()> {
        match &self.storage {
            Some(storage) => storage.persist(&self.queue.pending()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn scratch_path() -> PathBuf {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "relay-cmdrelay-test-{}-{n}.json",
            std::process::id()
        ))
    }

    #[test]
    fn in_memory_relay_enqueues_and_drains() {
        let mut relay = CommandRelay::in_memory();
        relay.enqueue("DAY".to_string(), vec![]).expect("enqueue");
        relay
            .enqueue("NIGHT".to_string(), vec![json!(5)])
            .expect("enqueue");

        let drained = relay.drain_all();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].command, "DAY");
        assert!(relay.is_empty());
    }

    #[test]
    fn enqueued_commands_survive_a_restart() {
        let path = scratch_path();

        let mut relay = CommandRelay::with_storage(QueueStorage::new(&path));
        relay.enqueue("DAY".to_string(), vec![]).expect("enqueue");
        relay
            .enqueue("NIGHT".to_string(), vec![json!(5)])
            .expect("enqueue");
        drop(relay);

        let mut restored = CommandRelay::with_storage(QueueStorage::new(&path));
        let drained = restored.drain_all();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].command, "DAY");
        assert_eq!(drained[1].args, vec![json!(5)]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn drain_persists_the_empty_state() {
        let path = scratch_path();

        let mut relay = CommandRelay::with_storage(QueueStorage::new(&path));
        relay.enqueue("DAY".to_string(), vec![]).expect("enqueue");
        relay.drain_all();
        drop(relay);

        let restored = CommandRelay::with_storage(QueueStorage::new(&path));
        assert!(restored.is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn corrupt_queue_file_starts_empty_instead_of_failing() {
        let path = scratch_path();
        std::fs::write(&path, b"][").expect("write corrupt file");

        let relay = CommandRelay::with_storage(QueueStorage::new(&path));
        assert!(relay.is_empty());

        let _ = std::fs::remove_file(&path);
    }
}
