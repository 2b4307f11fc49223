//! Durable counter store.
//!
//! The store is one JSON document mapping document type to calendar year to
//! the last issued counter:
//!
//! ```text
//! {
//!   "DEV": {
//!     "2024": 317,
//!     "2025": 124
//!   },
//!   "INV": {
//!     "2025": 42
//!   }
//! }
//! ```
//!
//! There is no partial-update API. Callers load the whole mapping, mutate it
//! in memory and save it back, which is only sound while the store lock is
//! held. Saving goes through [`crate::fs::atomic_write`], so the file on
//! disk always holds a complete document.
//!
//! Loading is strict: a file that exists but does not have the shape above
//! is reported as `SeqError::CorruptStore` and is never replaced by an
//! empty mapping.

use serde::Serialize;
use std::collections::BTreeMap;

mod io;
mod mutations;

/// Counters for one document type, keyed by year token (e.g. `"2025"`).
pub type YearCounters = BTreeMap<String, u64>;

/// In-memory copy of the counter store.
///
/// Keys are kept sorted so the serialized file is stable between writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CounterStore {
    counters: BTreeMap<String, YearCounters>,
}

/// Store key for a calendar year.
pub fn year_key(year: i32) -> String {
    year.to_string()
}
