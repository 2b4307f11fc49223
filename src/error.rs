//! Error types for seqnum.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for seqnum operations.
///
/// Each variant maps to a specific process exit code.
#[derive(Error, Debug)]
pub enum SeqError {
    /// The document type token is empty or contains disallowed characters.
    #[error("invalid document type: {0}")]
    InvalidType(String),

    /// The store lock could not be acquired within the wait budget.
    ///
    /// No counter was read or consumed; the caller may retry later.
    #[error("Lock acquisition failed: {0}")]
    LockTimeout(String),

    /// The counter store exists but cannot be parsed as `{type: {year: counter}}`.
    #[error("corrupt counter store: {0}")]
    CorruptStore(String),

    /// Filesystem read, write, sync, or rename failed.
    #[error("I/O failure: {0}")]
    Io(String),

    /// Invalid configuration or arguments.
    #[error("{0}")]
    UserError(String),
}

impl SeqError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SeqError::InvalidType(_) => exit_codes::USER_ERROR,
            SeqError::UserError(_) => exit_codes::USER_ERROR,
            SeqError::CorruptStore(_) => exit_codes::CORRUPT_STORE,
            SeqError::Io(_) => exit_codes::IO_FAILURE,
            SeqError::LockTimeout(_) => exit_codes::LOCK_FAILURE,
        }
    }

    /// Whether retrying the same call later can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SeqError::LockTimeout(_))
    }
}

/// Result type alias for seqnum operations.
pub type Result<T> = std::result::Result<T, SeqError>;
