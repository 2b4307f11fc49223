//! Seqnum: crash-safe sequential document numbers.
//!
//! Counters live in a JSON file (`sequences.json`) in a data directory,
//! keyed by document type and year. Every allocation happens under a
//! cross-process lock marker and is persisted with an atomic replace, so
//! concurrent processes sharing the directory never issue the same number.

pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod locks;
pub mod sequence;
pub mod store;

#[cfg(test)]
mod test_support;
