//! RAII lock guard implementation.

use crate::error::{Result, SeqError};
use log::{debug, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// RAII guard for the lock marker.
///
/// When dropped, the marker is deleted. A failed deletion is logged as a
/// warning and never panics.
#[derive(Debug)]
pub struct LockGuard {
    /// Path to the lock file.
    path: PathBuf,

    /// Whether the lock has been released manually.
    released: bool,
}

impl LockGuard {
    pub(super) fn new(path: PathBuf) -> Self {
        Self {
            path,
            released: false,
        }
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock now and report a removal failure to the caller.
    ///
    /// A marker that is already gone counts as released.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("released lock '{}'", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "lock '{}' was already removed before release",
                    self.path.display()
                );
                Ok(())
            }
            Err(e) => Err(SeqError::Io(format!(
                "failed to release lock '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("released lock '{}'", self.path.display()),
            Err(e) => warn!(
                "failed to release lock '{}': {}",
                self.path.display(),
                e
            ),
        }
    }
}
