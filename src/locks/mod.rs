//! Cross-process store lock.
//!
//! One lock marker (`sequences.json.lock`) guards the whole counter store.
//! Mutual exclusion between unrelated processes relies on a single
//! filesystem primitive: the marker is created with **create_new**
//! semantics (`O_CREAT | O_EXCL`), which fails atomically when the file
//! already exists.
//!
//! # Waiting and staleness
//!
//! Acquisition polls until the marker can be created or the wait budget
//! runs out (`SeqError::LockTimeout`). A marker whose modification time is
//! older than the staleness threshold is treated as abandoned by a crashed
//! holder: it is deleted and creation is retried without sleeping. A marker
//! younger than the threshold is never removed by a waiter.
//!
//! Two waiters can judge the same marker stale at once; the slower one may
//! then delete the marker the faster one just created. The threshold must
//! therefore stay far above the longest critical section.
//!
//! # Lock Metadata
//!
//! The marker contains JSON metadata (`owner`, `pid`, `created_at`,
//! `purpose`) for diagnostics only. Nothing in acquisition or release reads
//! it.
//!
//! # RAII Guards
//!
//! The marker is removed when the [`LockGuard`] is dropped. A failed removal
//! is logged and otherwise ignored; the stale check reclaims the marker later.

mod guard;
mod metadata;
mod operations;
mod types;


pub use guard::LockGuard;
pub(crate) use metadata::get_owner_string;
pub use metadata::{LockMetadata, format_age};
pub use operations::{acquire_lock, acquire_store_lock, clear_lock, inspect_lock, marker_age};
pub use types::{LockInfo, LockOptions};
