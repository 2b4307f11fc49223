//! Lock options and inspection results.

use super::metadata::{LockMetadata, format_age};
use crate::config::Config;
use std::path::PathBuf;
use std::time::Duration;

/// Timing parameters for [`acquire_lock`](super::acquire_lock).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOptions {
    /// Total time to wait before giving up with `LockTimeout`.
    pub timeout: Duration,

    /// Marker age beyond which the holder is presumed dead.
    pub stale_after: Duration,

    /// Sleep between attempts while the marker is held and fresh.
    pub retry_interval: Duration,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for LockOptions {
    fn from(config: &Config) -> Self {
        Self {
            timeout: config.lock_timeout(),
            stale_after: config.lock_stale_after(),
            retry_interval: config.lock_retry_interval(),
        }
    }
}

/// Snapshot of a lock marker found on disk.
#[derive(Debug, Clone)]
pub struct LockInfo {
    /// The marker path.
    pub path: PathBuf,

    /// Parsed marker contents, `None` when unreadable or not JSON.
    pub metadata: Option<LockMetadata>,

    /// Age derived from the marker's modification time.
    pub age: Duration,

    /// Whether the age exceeds the staleness threshold.
    pub is_stale: bool,
}

impl LockInfo {
    /// Holder description for messages.
    pub fn holder(&self) -> String {
        match &self.metadata {
            Some(meta) => match meta.pid {
                Some(pid) => format!("{} (pid {})", meta.owner, pid),
                None => meta.owner.clone(),
            },
            None => "unknown holder".to_string(),
        }
    }
}

impl std::fmt::Display for LockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (held by {}, age: {}{})",
            self.path.display(),
            self.holder(),
            format_age(self.age),
            if self.is_stale { ", STALE" } else { "" }
        )
    }
}
