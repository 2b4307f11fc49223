//! Counter reads and in-memory mutations.

use super::{CounterStore, YearCounters, year_key};
use crate::error::{Result, SeqError};

impl CounterStore {
    /// Last issued counter for `(doc_type, year)`, 0 when none was issued.
    pub fn get(&self, doc_type: &str, year: i32) -> u64 {
        self.counters
            .get(doc_type)
            .and_then(|years| years.get(&year_key(year)))
            .copied()
            .unwrap_or(0)
    }

    /// Overwrite the counter for `(doc_type, year)`.
    pub fn set(&mut self, doc_type: &str, year: i32, value: u64) {
        self.counters
            .entry(doc_type.to_string())
            .or_default()
            .insert(year_key(year), value);
    }

    /// Increment the counter for `(doc_type, year)` and return the new value.
    ///
    /// A year with no entry starts from zero, so its first value is 1.
    pub fn increment(&mut self, doc_type: &str, year: i32) -> Result<u64> {
        let next = self.get(doc_type, year).checked_add(1).ok_or_else(|| {
            SeqError::CorruptStore(format!(
                "counter '{}/{}' cannot be incremented past {}",
                doc_type,
                year,
                u64::MAX
            ))
        })?;
        self.set(doc_type, year, next);
        Ok(next)
    }

    /// Counters for one document type.
    pub fn years(&self, doc_type: &str) -> Option<&YearCounters> {
        self.counters.get(doc_type)
    }

    /// All document types with their year counters, sorted by type.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &YearCounters)> {
        self.counters.iter().map(|(t, y)| (t.as_str(), y))
    }

    /// Whether no counter has ever been issued.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
