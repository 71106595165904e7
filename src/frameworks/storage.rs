// File-as-database persistence for the command queue.
//
// The whole queue is rewritten on every mutation. Writes go to a sibling
// temp file first and are renamed into place so a crash mid-write never
// leaves a truncated JSON file behind.

use crate::domain::command_queue::Command;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct QueueStorage {
    path: PathBuf,
}

impl QueueStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Load persisted commands. A missing file is an empty queue.
    pub fn load(&self) -> io::Result<Vec<Command>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error),
        };

        serde_json::from_slice(&raw).map_err(|error| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("corrupt queue file {}: {error}", self.path.display()),
            )
        })
    }

    // Rewrite the full queue contents, temp-then-rename.
    pub fn persist(&self, commands: &[Command]) -> io::Result<()> {
        let payload = serde_json::to_vec_pretty(commands).map_err(io::Error::other)?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, payload)?;
        fs::rename(&tmp_path, &self.path)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
