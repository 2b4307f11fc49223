//! Sequential document numbers.
//!
//! A [`Sequencer`] issues codes of the form `TYPE-YYYY-DDMM-NNNNNN`, with a
//! counter per document type and calendar year that restarts at 1 every
//! year. Each allocation runs the full cycle under the store lock:
//!
//! 1. acquire `sequences.json.lock` (bounded wait, stale reclamation)
//! 2. load `sequences.json` (strict: corruption aborts before any change)
//! 3. increment the counter in memory
//! 4. persist with an atomic replace
//! 5. release the lock
//!
//! Nothing is cached between calls, so any number of processes can share
//! one data directory. A returned counter has always been persisted; a
//! failed call has consumed nothing.
//!
//! ```no_run
//! use seqnum::context::DataContext;
//! use seqnum::sequence::Sequencer;
//!
//! let sequencer = Sequencer::open(DataContext::new("Data"))?;
//! let allocation = sequencer.next_number("inv", 6)?;
//! println!("{} -> {}", allocation.counter, allocation.code);
//!
//! let code = sequencer.get_number("DEV", "Jean-Luc Picard")?;
//! assert!(code.ends_with("-JLP"));
//! # Ok::<(), seqnum::error::SeqError>(())
//! ```

mod doc_type;
mod format;
mod initials;

#[cfg(test)]
mod tests;

pub use doc_type::DocType;
pub use format::format_code;
pub use initials::get_initials;

use crate::config::Config;
use crate::context::DataContext;
use crate::error::Result;
use crate::events::{AllocationEvent, append_event};
use crate::locks::{LockOptions, acquire_store_lock};
use crate::store::CounterStore;
use chrono::{Datelike, Local, NaiveDate};
use log::{debug, warn};

/// One issued number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub doc_type: DocType,
    pub year: i32,
    /// The counter value after increment, starting at 1 each year.
    pub counter: u64,
    /// Formatted `TYPE-YYYY-DDMM-NNNNNN`.
    pub code: String,
}

impl std::fmt::Display for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}

/// Number generator bound to one data directory.
#[derive(Debug, Clone)]
pub struct Sequencer {
    ctx: DataContext,
    config: Config,
}

impl Sequencer {
    pub fn new(ctx: DataContext, config: Config) -> Self {
        Self { ctx, config }
    }

    /// Bind to `ctx`, reading `config.yaml` from it when present.
    pub fn open(ctx: DataContext) -> Result<Self> {
        let config = Config::load_for(&ctx)?;
        Ok(Self::new(ctx, config))
    }

    pub fn context(&self) -> &DataContext {
        &self.ctx
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Allocate the next counter for `doc_type` in the current year.
    ///
    /// `doc_type` is trimmed and uppercased. The date is read from the local
    /// clock once, so year and `DDMM` always agree.
    ///
    /// # Errors
    ///
    /// * `InvalidType` - `doc_type` is not 1 to 16 of `A-Z0-9_-`
    /// * `LockTimeout` - another process held the lock for the whole wait budget
    /// * `CorruptStore` - the store file is malformed; nothing was changed
    /// * `Io` - reading or persisting the store failed
    pub fn next_number(&self, doc_type: &str, width: usize) -> Result<Allocation> {
        self.next_number_on(doc_type, width, Local::now().date_naive())
    }

    /// Allocate the next counter as if issued on `date`.
    pub fn next_number_on(&self, doc_type: &str, width: usize, date: NaiveDate) -> Result<Allocation> {
        let doc_type = DocType::parse(doc_type)?;
        let year = date.year();
        let store_path = self.ctx.store_path();

        let guard = acquire_store_lock(
            &self.ctx,
            &LockOptions::from(&self.config),
            &format!("next_number {}", doc_type),
        )?;

        // Any error below drops the guard, which removes the marker.
        let mut store = CounterStore::load(&store_path)?;
        let counter = store.increment(doc_type.as_str(), year)?;
        let code = format_code(&doc_type, date, counter, width);
        store.save(&store_path)?;

        // The counter is durable from here on; later steps only warn.
        debug!("issued {} (counter {} for {}/{})", code, counter, doc_type, year);

        if self.config.audit_log {
            let event = AllocationEvent::new(doc_type.as_str(), year, counter, &code);
            if let Err(e) = append_event(&self.ctx, &event) {
                warn!("failed to record {} in the audit log: {}", code, e);
            }
        }

        // A failed release only delays the next caller until the marker goes stale.
        if let Err(e) = guard.release() {
            warn!("{}", e);
        }

        Ok(Allocation {
            doc_type,
            year,
            counter,
            code,
        })
    }

    /// Allocate a number and append the initials of `name`.
    ///
    /// Uses the configured `default_width`. The result is
    /// `TYPE-YYYY-DDMM-NNNNNN-INITIALS`; when `name` has no letters it still
    /// ends with the separator (`...-000042-`), which existing consumers
    /// rely on.
    pub fn get_number(&self, doc_type: &str, name: &str) -> Result<String> {
        self.get_number_on(doc_type, name, Local::now().date_naive())
    }

    /// [`get_number`](Self::get_number) as if issued on `date`.
    pub fn get_number_on(&self, doc_type: &str, name: &str, date: NaiveDate) -> Result<String> {
        let allocation = self.next_number_on(doc_type, self.config.default_width, date)?;
        Ok(format!("{}-{}", allocation.code, get_initials(name, true)))
    }

    /// Last counter issued for `(doc_type, year)`, 0 if none.
    ///
    /// Reads without the lock; the atomic replace guarantees a complete file.
    pub fn current(&self, doc_type: &str, year: i32) -> Result<u64> {
        let doc_type = DocType::parse(doc_type)?;
        Ok(self.snapshot()?.get(doc_type.as_str(), year))
    }

    /// The whole store as currently persisted.
    pub fn snapshot(&self) -> Result<CounterStore> {
        CounterStore::load(self.ctx.store_path())
    }
}
