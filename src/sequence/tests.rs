//! Tests for number allocation.

use super::*;
use crate::error::SeqError;
use crate::events::read_events;
use crate::locks::LockOptions;
use crate::test_support::{create_test_data_dir, write_aged_lock};
use std::collections::BTreeSet;
use std::fs;
use std::thread;
use std::time::Duration;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fast_config() -> Config {
    Config {
        lock_timeout_ms: 10_000,
        lock_retry_ms: 5,
        ..Config::default()
    }
}

fn test_sequencer() -> (tempfile::TempDir, Sequencer) {
    let (temp_dir, ctx) = create_test_data_dir();
    (temp_dir, Sequencer::new(ctx, fast_config()))
}

#[test]
fn test_first_allocation_starts_at_one() {
    let (_temp_dir, sequencer) = test_sequencer();

    let allocation = sequencer.next_number_on("DEV", 6, date(2025, 12, 31)).unwrap();

    assert_eq!(allocation.counter, 1);
    assert_eq!(allocation.code, "DEV-2025-3112-000001");
    assert_eq!(allocation.year, 2025);
    assert_eq!(allocation.doc_type.as_str(), "DEV");
    assert_eq!(allocation.to_string(), allocation.code);
}

#[test]
fn test_format_after_existing_counter() {
    let (_temp_dir, sequencer) = test_sequencer();
    let mut store = CounterStore::default();
    store.set("INV", 2025, 7);
    store.save(sequencer.context().store_path()).unwrap();

    let allocation = sequencer.next_number_on("inv", 4, date(2025, 3, 5)).unwrap();

    assert_eq!(allocation.counter, 8);
    assert_eq!(allocation.code, "INV-2025-0503-0008");
}

#[test]
fn test_very_wide_width_returns_the_persisted_counter() {
    let (_temp_dir, sequencer) = test_sequencer();

    let allocation = sequencer
        .next_number_on("INV", 70_000, date(2025, 3, 5))
        .unwrap();

    assert_eq!(allocation.counter, 1);
    assert_eq!(allocation.code.len(), "INV-2025-0503-".len() + 70_000);
    assert!(allocation.code.ends_with("0001"));
    assert_eq!(sequencer.current("INV", 2025).unwrap(), 1);
}

#[test]
fn test_next_number_uses_current_year() {
    let (_temp_dir, sequencer) = test_sequencer();
    let year = Local::now().year();
    let mut store = CounterStore::default();
    store.set("INV", year, 7);
    store.save(sequencer.context().store_path()).unwrap();

    let allocation = sequencer.next_number("inv", 4).unwrap();

    assert_eq!(allocation.counter, 8);
    assert!(allocation.code.starts_with(&format!("INV-{}-", year)));
    assert!(allocation.code.ends_with("-0008"));
}

#[test]
fn test_counter_is_persisted_before_returning() {
    let (_temp_dir, sequencer) = test_sequencer();

    for expected in 1..=3 {
        let allocation = sequencer.next_number_on("INV", 6, date(2025, 1, 2)).unwrap();
        let on_disk = CounterStore::load(sequencer.context().store_path()).unwrap();
        assert_eq!(allocation.counter, expected);
        assert_eq!(on_disk.get("INV", 2025), expected);
    }

    // Lock released after every call.
    assert!(!sequencer.context().lock_path().exists());
}

#[test]
fn test_years_are_isolated() {
    let (_temp_dir, sequencer) = test_sequencer();

    for _ in 0..5 {
        sequencer.next_number_on("INV", 6, date(2024, 12, 31)).unwrap();
    }
    let new_year = sequencer.next_number_on("INV", 6, date(2025, 1, 1)).unwrap();
    let old_year = sequencer.next_number_on("INV", 6, date(2024, 12, 31)).unwrap();

    assert_eq!(new_year.counter, 1);
    assert_eq!(new_year.code, "INV-2025-0101-000001");
    assert_eq!(old_year.counter, 6);
}

#[test]
fn test_types_are_isolated_and_normalized() {
    let (_temp_dir, sequencer) = test_sequencer();
    let day = date(2025, 6, 1);

    assert_eq!(sequencer.next_number_on("inv", 6, day).unwrap().counter, 1);
    assert_eq!(sequencer.next_number_on(" INV ", 6, day).unwrap().counter, 2);
    assert_eq!(sequencer.next_number_on("dev", 6, day).unwrap().counter, 1);

    let snapshot = sequencer.snapshot().unwrap();
    assert_eq!(snapshot.get("INV", 2025), 2);
    assert_eq!(snapshot.get("DEV", 2025), 1);
}

#[test]
fn test_invalid_type_touches_nothing() {
    let (_temp_dir, sequencer) = test_sequencer();

    let err = sequencer.next_number("in voice", 6).unwrap_err();

    assert!(matches!(err, SeqError::InvalidType(_)));
    assert!(!sequencer.context().store_path().exists());
    assert!(!sequencer.context().lock_path().exists());
}

#[test]
fn test_corrupt_store_consumes_nothing_and_releases_lock() {
    let (_temp_dir, sequencer) = test_sequencer();
    let store_path = sequencer.context().store_path();
    fs::write(&store_path, "\"not an object\"").unwrap();

    let err = sequencer.next_number("INV", 6).unwrap_err();

    assert!(matches!(err, SeqError::CorruptStore(_)));
    assert_eq!(fs::read_to_string(&store_path).unwrap(), "\"not an object\"");
    assert!(!sequencer.context().lock_path().exists());
}

#[test]
fn test_lock_timeout_reads_nothing() {
    let (_temp_dir, ctx) = create_test_data_dir();
    let config = Config {
        lock_timeout_ms: 100,
        lock_retry_ms: 10,
        ..Config::default()
    };
    let sequencer = Sequencer::new(ctx.clone(), config);
    let _held = acquire_store_lock(&ctx, &LockOptions::default(), "other process").unwrap();

    let err = sequencer.next_number("INV", 6).unwrap_err();

    assert!(matches!(err, SeqError::LockTimeout(_)));
    assert!(err.is_retryable());
    assert!(!ctx.store_path().exists());
    assert!(ctx.lock_path().exists());
}

#[test]
fn test_abandoned_lock_is_reclaimed() {
    let (_temp_dir, sequencer) = test_sequencer();
    write_aged_lock(
        &sequencer.context().lock_path(),
        "{\"pid\": 4242}",
        Duration::from_secs(3600),
    );

    let allocation = sequencer.next_number_on("INV", 6, date(2025, 2, 1)).unwrap();

    assert_eq!(allocation.counter, 1);
    assert!(!sequencer.context().lock_path().exists());
}

#[test]
fn test_concurrent_allocations_are_unique_and_gapless() {
    let (_temp_dir, sequencer) = test_sequencer();
    let day = date(2025, 5, 20);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let sequencer = sequencer.clone();
            thread::spawn(move || {
                (0..20)
                    .map(|_| sequencer.next_number_on("INV", 6, day).unwrap().counter)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut issued = Vec::new();
    for handle in handles {
        issued.extend(handle.join().unwrap());
    }

    let unique: BTreeSet<u64> = issued.iter().copied().collect();
    assert_eq!(unique.len(), issued.len(), "duplicate counters issued");
    assert_eq!(unique, (1..=160).collect::<BTreeSet<u64>>());
    assert_eq!(sequencer.current("INV", 2025).unwrap(), 160);
}

#[test]
fn test_get_number_appends_initials() {
    let (_temp_dir, sequencer) = test_sequencer();

    let code = sequencer
        .get_number_on("dev", "Jean-Luc Picard", date(2025, 3, 5))
        .unwrap();

    assert_eq!(code, "DEV-2025-0503-000001-JLP");
}

#[test]
fn test_get_number_strips_accents() {
    let (_temp_dir, sequencer) = test_sequencer();

    let code = sequencer
        .get_number_on("DEV", "Élodie Müller", date(2025, 3, 5))
        .unwrap();

    assert_eq!(code, "DEV-2025-0503-000001-EM");
}

#[test]
fn test_get_number_keeps_trailing_separator_without_initials() {
    let (_temp_dir, sequencer) = test_sequencer();

    let code = sequencer.get_number_on("INV", "  ", date(2025, 3, 5)).unwrap();

    assert_eq!(code, "INV-2025-0503-000001-");
}

#[test]
fn test_get_number_uses_configured_width() {
    let (_temp_dir, ctx) = create_test_data_dir();
    let config = Config {
        default_width: 3,
        ..fast_config()
    };
    let sequencer = Sequencer::new(ctx, config);

    let code = sequencer.get_number_on("INV", "Ada", date(2025, 3, 5)).unwrap();

    assert_eq!(code, "INV-2025-0503-001-A");
}

#[test]
fn test_get_number_propagates_invalid_type() {
    let (_temp_dir, sequencer) = test_sequencer();

    let err = sequencer.get_number("", "Ada").unwrap_err();
    assert!(matches!(err, SeqError::InvalidType(_)));
}

#[test]
fn test_audit_log_records_allocations_when_enabled() {
    let (_temp_dir, ctx) = create_test_data_dir();
    let config = Config {
        audit_log: true,
        ..fast_config()
    };
    let sequencer = Sequencer::new(ctx.clone(), config);

    sequencer.next_number_on("INV", 6, date(2025, 3, 5)).unwrap();
    sequencer.next_number_on("DEV", 6, date(2025, 3, 5)).unwrap();

    let events = read_events(&ctx).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].code, "INV-2025-0503-000001");
    assert_eq!(events[1].doc_type, "DEV");
}

#[test]
fn test_audit_log_is_off_by_default() {
    let (_temp_dir, sequencer) = test_sequencer();

    sequencer.next_number_on("INV", 6, date(2025, 3, 5)).unwrap();

    assert!(!sequencer.context().events_path().exists());
}

#[test]
fn test_current_without_allocations() {
    let (_temp_dir, sequencer) = test_sequencer();

    assert_eq!(sequencer.current("inv", 2025).unwrap(), 0);
    assert!(matches!(
        sequencer.current("bad type!", 2025),
        Err(SeqError::InvalidType(_))
    ));
}

#[test]
fn test_open_reads_config_from_data_dir() {
    let (_temp_dir, ctx) = create_test_data_dir();
    fs::write(ctx.config_path(), "default_width: 4\naudit_log: true\n").unwrap();

    let sequencer = Sequencer::open(ctx).unwrap();

    assert_eq!(sequencer.config().default_width, 4);
    assert!(sequencer.config().audit_log);
}

#[test]
fn test_independent_data_dirs_do_not_interact() {
    let (_a, first) = test_sequencer();
    let (_b, second) = test_sequencer();
    let day = date(2025, 3, 5);

    first.next_number_on("INV", 6, day).unwrap();
    first.next_number_on("INV", 6, day).unwrap();

    assert_eq!(second.next_number_on("INV", 6, day).unwrap().counter, 1);
}
