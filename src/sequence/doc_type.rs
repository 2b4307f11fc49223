//! Document type tokens.

use crate::error::{Result, SeqError};
use regex::Regex;
use std::sync::LazyLock;

static DOC_TYPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9_-]{1,16}$").expect("Invalid document type regex"));

/// A validated, normalized document type (e.g. `INV`, `DEV`).
///
/// Always uppercase, 1 to 16 characters from `A-Z`, `0-9`, `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocType(String);

impl DocType {
    /// Trim and uppercase `raw`, then validate it.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(SeqError::InvalidType(
                "document type must not be empty".to_string(),
            ));
        }
        if !DOC_TYPE_REGEX.is_match(&normalized) {
            return Err(SeqError::InvalidType(format!(
                "'{}' contains disallowed characters or is too long (allowed: A-Z, 0-9, '-', '_'; 1 to 16 characters)",
                raw.trim()
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for DocType {
    type Err = SeqError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
