//! Filesystem utilities for seqnum.
//!
//! The counter store depends on the crash-atomic replace implemented here.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
