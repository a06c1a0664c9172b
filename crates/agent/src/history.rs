//! Session history export — write the transcript to disk at shutdown.
//!
//! One JSON array of messages per session, written to a timestamped file in
//! the history directory. The directory is created on demand. Called by the
//! CLI when the user types `exit`, on end-of-input, and on Ctrl-C.

use chrono::Utc;
use deskhand_core::message::Conversation;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Writes session transcripts into a history directory.
pub struct HistoryWriter {
    dir: PathBuf,
}

impl HistoryWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The directory exports are written to.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Export the conversation's messages as a JSON array.
    ///
    /// Returns the path of the written file. An empty transcript (system
    /// message only, or nothing) is not worth keeping and is skipped.
    pub fn export(&self, conversation: &Conversation) -> std::io::Result<Option<PathBuf>> {
        if conversation.messages.len() <= 1 {
            debug!("Transcript empty, skipping history export");
            return Ok(None);
        }

        std::fs::create_dir_all(&self.dir)?;

        let filename = format!("session_{}.json", Utc::now().format("%Y%m%dT%H%M%S%.3fZ"));
        let path = self.dir.join(filename);

        let content = serde_json::to_string_pretty(&conversation.messages)
            .map_err(std::io::Error::other)?;

        if let Err(e) = std::fs::write(&path, content) {
            warn!(path = %path.display(), error = %e, "History export failed");
            return Err(e);
        }

        debug!(path = %path.display(), messages = conversation.messages.len(), "Session exported");
        Ok(Some(path))
    }
}
