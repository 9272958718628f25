use chrono::{DateTime, Utc};
use parking_lot::RwLock;

const NO_OUTPUT_YET: &str = "No previous output...";

/// Mutable per-process assistant state shared between the orchestration
/// loop and any attached control surface.
///
/// Single writer (the active turn), multiple readers; last write wins.
pub struct SessionState {
    last_output: RwLock<String>,
    last_published_at: RwLock<Option<DateTime<Utc>>>,
    previous_command_output: RwLock<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            last_output: RwLock::new(NO_OUTPUT_YET.to_string()),
            last_published_at: RwLock::new(None),
            previous_command_output: RwLock::new(String::new()),
        }
    }

    /// Most recent user-facing message extracted from a model response.
    pub fn last_output(&self) -> String {
        self.last_output.read().clone()
    }

    pub fn publish_output(&self, text: &str) {
        *self.last_output.write() = text.to_string();
        *self.last_published_at.write() = Some(Utc::now());
    }

    pub fn last_published_at(&self) -> Option<DateTime<Utc>> {
        *self.last_published_at.read()
    }

    /// Captured stdout of the most recent USER-owned shell command.
    pub fn command_output(&self) -> String {
        self.previous_command_output.read().clone()
    }

    pub fn set_command_output(&self, output: &str) {
        *self.previous_command_output.write() = output.to_string();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
