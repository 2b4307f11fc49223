//! Lock acquisition, inspection, and clearing operations.

use super::guard::LockGuard;
use super::metadata::{LockMetadata, format_age};
use super::types::{LockInfo, LockOptions};
use crate::context::DataContext;
use crate::error::{Result, SeqError};
use log::{debug, trace, warn};
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant, SystemTime};

/// Acquire the store lock for `ctx`, creating the data directory first.
///
/// See [`acquire_lock`].
pub fn acquire_store_lock(
    ctx: &DataContext,
    options: &LockOptions,
    purpose: &str,
) -> Result<LockGuard> {
    ctx.ensure_dir()?;
    acquire_lock(&ctx.lock_path(), options, purpose)
}

/// Block until the marker at `lock_path` is created by this call.
///
/// Each attempt is a single exclusive create. When the marker exists and is
/// older than `options.stale_after`, it is removed and creation is retried
/// immediately; a failure to remove it is treated as ordinary contention.
/// Otherwise the call sleeps `options.retry_interval` and tries again until
/// `options.timeout` has elapsed.
///
/// # Returns
///
/// * `Ok(LockGuard)` - The marker was created; dropping the guard removes it
/// * `Err(SeqError::LockTimeout)` - The wait budget ran out (exit code 4)
/// * `Err(SeqError::Io)` - The marker could not be created for another reason,
///   including a missing parent directory
pub fn acquire_lock(lock_path: &Path, options: &LockOptions, purpose: &str) -> Result<LockGuard> {
    let metadata = LockMetadata::new(purpose);
    let started = Instant::now();
    let deadline = started + options.timeout;
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        if let Some(guard) = try_create(lock_path, &metadata)? {
            debug!(
                "acquired lock '{}' after {} attempt(s) in {:?}",
                lock_path.display(),
                attempts,
                started.elapsed()
            );
            return Ok(guard);
        }

        if is_stale(lock_path, options.stale_after) {
            match fs::remove_file(lock_path) {
                Ok(()) => {
                    warn!(
                        "removed stale lock '{}' (older than {:?})",
                        lock_path.display(),
                        options.stale_after
                    );
                    continue;
                }
                // Another waiter reclaimed it first.
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => debug!(
                    "could not remove stale lock '{}': {}",
                    lock_path.display(),
                    e
                ),
            }
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(timeout_error(lock_path, options.timeout));
        }

        trace!(
            "lock '{}' is held, retrying in {:?}",
            lock_path.display(),
            options.retry_interval
        );
        thread::sleep(options.retry_interval.min(deadline - now));
    }
}

/// One exclusive-create attempt. `Ok(None)` means the marker already exists.
fn try_create(lock_path: &Path, metadata: &LockMetadata) -> Result<Option<LockGuard>> {
    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(lock_path)
    {
        Ok(file) => file,
        Err(e) if is_contended(&e) => return Ok(None),
        Err(e) => {
            return Err(SeqError::Io(format!(
                "failed to create lock '{}': {}",
                lock_path.display(),
                e
            )));
        }
    };

    let written = metadata.to_json().and_then(|json| {
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| {
                SeqError::Io(format!(
                    "failed to write lock metadata to '{}': {}",
                    lock_path.display(),
                    e
                ))
            })
    });
    drop(file);

    if let Err(e) = written {
        // The marker is ours; do not leave it behind for a full stale period.
        let _ = fs::remove_file(lock_path);
        return Err(e);
    }

    Ok(Some(LockGuard::new(lock_path.to_path_buf())))
}

/// Whether a create_new failure means "someone else holds the marker".
fn is_contended(err: &io::Error) -> bool {
    if err.kind() == ErrorKind::AlreadyExists {
        return true;
    }
    // Windows reports a marker that is pending deletion as access denied.
    cfg!(windows) && err.kind() == ErrorKind::PermissionDenied
}

/// Age of the marker according to its modification time.
///
/// A modification time in the future counts as age zero.
pub fn marker_age(lock_path: &Path) -> io::Result<Duration> {
    let modified = fs::metadata(lock_path)?.modified()?;
    Ok(SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO))
}

/// True when the marker exists and is strictly older than `stale_after`.
fn is_stale(lock_path: &Path, stale_after: Duration) -> bool {
    match marker_age(lock_path) {
        Ok(age) => age > stale_after,
        Err(_) => false,
    }
}

fn timeout_error(lock_path: &Path, timeout: Duration) -> SeqError {
    let holder = match LockMetadata::from_file(lock_path) {
        Ok(meta) => {
            let age = marker_age(lock_path).unwrap_or(Duration::ZERO);
            format!(
                "\nHeld by: {}{} for {} ({})",
                meta.owner,
                meta.pid.map(|p| format!(" pid {}", p)).unwrap_or_default(),
                format_age(age),
                meta.purpose
            )
        }
        Err(_) => String::new(),
    };
    SeqError::LockTimeout(format!(
        "timed out after {}ms waiting for '{}'; the counter store is busy{}",
        timeout.as_millis(),
        lock_path.display(),
        holder
    ))
}

/// Describe the store lock marker, if one exists.
///
/// Unparseable marker contents are reported with `metadata: None`.
pub fn inspect_lock(ctx: &DataContext, stale_after: Duration) -> Result<Option<LockInfo>> {
    let lock_path = ctx.lock_path();
    let age = match marker_age(&lock_path) {
        Ok(age) => age,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(SeqError::Io(format!(
                "failed to stat lock '{}': {}",
                lock_path.display(),
                e
            )));
        }
    };

    Ok(Some(LockInfo {
        metadata: LockMetadata::from_file(&lock_path).ok(),
        path: lock_path,
        age,
        is_stale: age > stale_after,
    }))
}

/// Remove the store lock marker unconditionally.
///
/// The caller is responsible for verifying that clearing is appropriate.
///
/// # Returns
///
/// * `Ok(LockInfo)` - What was cleared (for reporting)
/// * `Err(SeqError::UserError)` - No marker exists
pub fn clear_lock(ctx: &DataContext, stale_after: Duration) -> Result<LockInfo> {
    let info = inspect_lock(ctx, stale_after)?.ok_or_else(|| {
        SeqError::UserError(format!(
            "lock does not exist at: {}",
            ctx.lock_path().display()
        ))
    })?;

    fs::remove_file(&info.path).map_err(|e| {
        SeqError::Io(format!(
            "failed to clear lock '{}': {}",
            info.path.display(),
            e
        ))
    })?;

    Ok(info)
}
