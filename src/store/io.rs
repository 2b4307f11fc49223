//! Loading, validating, and atomically saving the counter store.

use super::{CounterStore, YearCounters};
use crate::error::{Result, SeqError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

impl CounterStore {
    /// Load the store from disk.
    ///
    /// # Returns
    ///
    /// * `Ok(CounterStore)` - Parsed store, or an empty one if the file does not exist
    /// * `Err(SeqError::CorruptStore)` - The file exists but is malformed
    /// * `Err(SeqError::Io)` - The file could not be read
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(SeqError::CorruptStore(format!(
                    "'{}' is not valid UTF-8",
                    path.display()
                )));
            }
            Err(e) => {
                return Err(SeqError::Io(format!(
                    "failed to read counter store '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        Self::parse(&content)
            .map_err(|reason| SeqError::CorruptStore(format!("'{}': {}", path.display(), reason)))
    }

    /// Atomically save the store to disk.
    ///
    /// Uses atomic write (temp file + fsync + rename) so the store file is
    /// never left half-written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_json()?;
        crate::fs::atomic_write_file(path, &content)
    }

    /// Serialize the store as pretty-printed JSON with sorted keys.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SeqError::Io(format!("failed to serialize counter store: {}", e)))
    }

    /// Parse and validate store content.
    ///
    /// The root must be an object of objects. Leaf counters must be
    /// integer-coercible and non-negative: JSON integers, whole-valued
    /// numbers such as `12.0`, or strings holding a decimal integer.
    pub(crate) fn parse(content: &str) -> std::result::Result<Self, String> {
        let root: Value =
            serde_json::from_str(content).map_err(|e| format!("invalid JSON: {}", e))?;

        let types = match root {
            Value::Object(types) => types,
            other => {
                return Err(format!(
                    "expected an object at the root, found {}",
                    kind_of(&other)
                ));
            }
        };

        let mut counters = BTreeMap::new();
        for (doc_type, years) in types {
            let years = match years {
                Value::Object(years) => years,
                other => {
                    return Err(format!(
                        "entry '{}' must be an object of year counters, found {}",
                        doc_type,
                        kind_of(&other)
                    ));
                }
            };
            let parsed = parse_years(&doc_type, years)?;
            counters.insert(doc_type, parsed);
        }

        Ok(Self { counters })
    }
}

fn parse_years(
    doc_type: &str,
    years: Map<String, Value>,
) -> std::result::Result<YearCounters, String> {
    let mut parsed = YearCounters::new();
    for (year, value) in years {
        let counter = coerce_counter(&value).ok_or_else(|| {
            format!(
                "counter '{}/{}' is not a non-negative integer: {}",
                doc_type, year, value
            )
        })?;
        parsed.insert(year, counter);
    }
    Ok(parsed)
}

fn coerce_counter(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            let f = n.as_f64()?;
            (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64)
                .then_some(f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
