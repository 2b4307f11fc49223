//! Data directory resolution for seqnum.
//!
//! Every file the generator touches lives in one data directory. A
//! `DataContext` is the explicit handle to that directory: the sequencer,
//! the lock, and the audit log all derive their paths from it, so several
//! independent stores can coexist in one process (tests do this).

use crate::error::{Result, SeqError};
use std::env;
use std::path::{Path, PathBuf};

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "Data";

/// File name of the counter store.
pub const STORE_FILE_NAME: &str = "sequences.json";

/// File name of the lock marker.
pub const LOCK_FILE_NAME: &str = "sequences.json.lock";

/// File name of the allocation audit log.
pub const EVENTS_FILE_NAME: &str = "sequences.events.ndjson";

/// File name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Paths for one counter store, all derived from the data directory.
///
/// [`resolve`](Self::resolve) yields an absolute directory; [`new`](Self::new)
/// keeps whatever it is given, so a relative directory stays relative to the
/// working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataContext {
    /// The data directory.
    pub data_dir: PathBuf,
}

impl DataContext {
    /// Resolve a data directory relative to the current working directory.
    ///
    /// `None` selects [`DEFAULT_DATA_DIR`]. Absolute paths are used as given.
    pub fn resolve(data_dir: Option<&Path>) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            SeqError::Io(format!("failed to get current working directory: {}", e))
        })?;

        Ok(Self::resolve_from(
            &cwd,
            data_dir.unwrap_or(Path::new(DEFAULT_DATA_DIR)),
        ))
    }

    /// Resolve a data directory against an explicit base directory.
    pub fn resolve_from<P: AsRef<Path>, Q: AsRef<Path>>(base: P, data_dir: Q) -> Self {
        let data_dir = data_dir.as_ref();
        if data_dir.is_absolute() {
            Self::new(data_dir)
        } else {
            Self::new(base.as_ref().join(data_dir))
        }
    }

    /// Use `data_dir` as-is.
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path to `sequences.json`.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }

    /// Path to `sequences.json.lock`.
    pub fn lock_path(&self) -> PathBuf {
        self.data_dir.join(LOCK_FILE_NAME)
    }

    /// Path to `sequences.events.ndjson`.
    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(EVENTS_FILE_NAME)
    }

    /// Path to `config.yaml`.
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }

    /// Create the data directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| {
            SeqError::Io(format!(
                "failed to create data directory '{}': {}",
                self.data_dir.display(),
                e
            ))
        })
    }
}
