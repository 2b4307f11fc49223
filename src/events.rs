//! Allocation audit log.
//!
//! When `audit_log` is enabled, every issued number is appended to
//! `sequences.events.ndjson` in the data directory, one JSON object per line:
//!
//! ```text
//! {"ts":"2025-03-05T09:14:03.120Z","actor":"anna@office-pc","doc_type":"INV","year":2025,"counter":8,"code":"INV-2025-0503-000008"}
//! ```
//!
//! Events are appended while the store lock is held, after the store itself
//! has been persisted. The store stays the source of truth; the log is a
//! trail for humans and is never read back by the allocator.

use crate::context::DataContext;
use crate::error::{Result, SeqError};
use crate::locks::get_owner_string;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};

/// One issued number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationEvent {
    /// RFC3339 timestamp when the number was issued.
    pub ts: DateTime<Utc>,

    /// Who issued it (e.g., `user@HOST`).
    pub actor: String,

    pub doc_type: String,
    pub year: i32,
    pub counter: u64,
    pub code: String,
}

impl AllocationEvent {
    /// Create an event stamped now for the current user.
    pub fn new(doc_type: &str, year: i32, counter: u64, code: &str) -> Self {
        Self {
            ts: Utc::now(),
            actor: get_owner_string(),
            doc_type: doc_type.to_string(),
            year,
            counter,
            code: code.to_string(),
        }
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| SeqError::Io(format!("failed to serialize event to JSON: {}", e)))
    }
}

/// Append an event to the audit log, creating the file if needed.
///
/// The line is synced to disk before returning.
pub fn append_event(ctx: &DataContext, event: &AllocationEvent) -> Result<()> {
    let events_file = ctx.events_path();
    let json_line = event.to_ndjson_line()?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&events_file)
        .map_err(|e| {
            SeqError::Io(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        SeqError::Io(format!(
            "failed to write event to '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        SeqError::Io(format!(
            "failed to sync events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    Ok(())
}

/// Read all events, oldest first. A missing log yields no events.
///
/// Lines that fail to parse (e.g. a torn last line after a crash) are skipped.
pub fn read_events(ctx: &DataContext) -> Result<Vec<AllocationEvent>> {
    let events_file = ctx.events_path();
    let content = match fs::read_to_string(&events_file) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(SeqError::Io(format!(
                "failed to read events file '{}': {}",
                events_file.display(),
                e
            )));
        }
    };

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect())
}
