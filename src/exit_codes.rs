//! Exit code constants for the seqnum CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid document type, invalid config)
//! - 2: Counter store is corrupt
//! - 3: Filesystem failure
//! - 4: Lock acquisition timed out

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid document type, or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// The counter store exists but could not be parsed.
pub const CORRUPT_STORE: i32 = 2;

/// Reading, writing, syncing, or renaming a file failed.
pub const IO_FAILURE: i32 = 3;

/// The store lock could not be acquired within the wait budget.
pub const LOCK_FAILURE: i32 = 4;
