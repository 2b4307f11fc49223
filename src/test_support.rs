use crate::context::DataContext;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// A fresh, empty data directory inside a temp dir.
pub(crate) fn create_test_data_dir() -> (TempDir, DataContext) {
    let temp_dir = TempDir::new().unwrap();
    let ctx = DataContext::new(temp_dir.path().join("Data"));
    ctx.ensure_dir().unwrap();
    (temp_dir, ctx)
}

/// Write a lock marker whose modification time lies `age` in the past,
/// as if its holder had crashed that long ago.
pub(crate) fn write_aged_lock(path: &Path, contents: &str, age: Duration) {
    std::fs::write(path, contents).unwrap();
    set_age(path, age);
}

/// Move a file's modification time `age` into the past.
pub(crate) fn set_age(path: &Path, age: Duration) {
    let file: File = OpenOptions::new().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
}
