//! Configuration defaults for seqnum.

/// Largest accepted `default_width`: a `u64` counter never needs more digits.
pub const MAX_WIDTH: usize = 20;

// Default value functions for serde
pub(crate) fn default_lock_timeout_ms() -> u64 {
    5_000
}
pub(crate) fn default_lock_stale_secs() -> u64 {
    30
}
pub(crate) fn default_lock_retry_ms() -> u64 {
    50
}
pub(crate) fn default_width() -> usize {
    6
}
