//! Config struct definition and default implementation.

use super::types::*;
use serde::Deserialize;

/// Configuration for one counter store.
///
/// This struct represents the contents of `<data dir>/config.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Lock settings
    // =========================================================================
    /// Milliseconds to wait for the store lock before failing (0 = one attempt).
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,

    /// Seconds after which an existing lock marker is considered abandoned.
    #[serde(default = "default_lock_stale_secs")]
    pub lock_stale_secs: u64,

    /// Milliseconds to sleep between lock attempts.
    #[serde(default = "default_lock_retry_ms")]
    pub lock_retry_ms: u64,

    // =========================================================================
    // Formatting settings
    // =========================================================================
    /// Zero-padded counter width used by `get_number` and the CLI.
    #[serde(default = "default_width")]
    pub default_width: usize,

    // =========================================================================
    // Audit settings
    // =========================================================================
    /// Append every allocation to `sequences.events.ndjson`.
    #[serde(default)]
    pub audit_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock_timeout_ms: default_lock_timeout_ms(),
            lock_stale_secs: default_lock_stale_secs(),
            lock_retry_ms: default_lock_retry_ms(),
            default_width: default_width(),
            audit_log: false,
        }
    }
}
