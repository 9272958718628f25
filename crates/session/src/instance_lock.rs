//! File-based single-instance guard.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum LockError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Exclusive lock on a well-known temp file. Held for the lifetime of the
/// primary process; a second launch fails to acquire it and should attach
/// to the control surface instead of starting another orchestration loop.
pub struct InstanceLock {
    file: File,
    path: PathBuf,
}

impl InstanceLock {
    pub fn default_path(app_name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}.lock", app_name))
    }

    /// Try to become the primary instance. `Ok(None)` means another
    /// instance already holds the lock.
    pub fn acquire(path: &Path) -> Result<Option<Self>, LockError> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(path)?;

        if file.try_lock_exclusive().is_err() {
            info!(path = %path.display(), "instance lock already held");
            return Ok(None);
        }

        file.set_len(0)?;
        writeln!(file, "{}", std::process::id())?;
        file.flush()?;
        info!(path = %path.display(), "instance lock acquired");

        Ok(Some(Self {
            file,
            path: path.to_path_buf(),
        }))
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            warn!(error = %e, "failed to release instance lock");
        }
        // Best effort; a stale file without the flock is harmless.
        let _ = std::fs::remove_file(&self.path);
    }
}
