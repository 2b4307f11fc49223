//! Implementation of the `show` and `history` commands.
//!
//! Both only read: the store is read without the lock (every write is an
//! atomic replace, so a reader always sees a complete file).

use crate::cli::{HistoryArgs, ShowArgs};
use seqnum::context::DataContext;
use seqnum::error::Result;
use seqnum::events::{AllocationEvent, read_events};
use seqnum::sequence::DocType;
use seqnum::store::CounterStore;
use std::fmt::Write;

pub fn cmd_show(ctx: &DataContext, args: ShowArgs) -> Result<()> {
    let filter = args.doc_type.as_deref().map(DocType::parse).transpose()?;
    let store = CounterStore::load(ctx.store_path())?;

    print!("{}", render_counters(&store, filter.as_ref()));
    Ok(())
}

pub fn cmd_history(ctx: &DataContext, args: HistoryArgs) -> Result<()> {
    let filter = args.doc_type.as_deref().map(DocType::parse).transpose()?;
    let events = read_events(ctx)?;

    if events.is_empty() {
        println!("No recorded allocations.");
        println!();
        println!("Set `audit_log: true` in {} to record them.", ctx.config_path().display());
        return Ok(());
    }

    print!("{}", render_history(&events, filter.as_ref(), args.limit));
    Ok(())
}

/// One block per document type, one line per year.
fn render_counters(store: &CounterStore, filter: Option<&DocType>) -> String {
    let mut out = String::new();

    let types: Vec<_> = match filter {
        Some(doc_type) => store
            .years(doc_type.as_str())
            .map(|years| (doc_type.as_str(), years))
            .into_iter()
            .collect(),
        None => store.iter().collect(),
    };

    if types.is_empty() {
        match filter {
            Some(doc_type) => {
                let _ = writeln!(out, "No numbers issued for {}.", doc_type);
            }
            None => {
                let _ = writeln!(out, "No numbers issued yet.");
            }
        }
        return out;
    }

    for (doc_type, years) in types {
        let _ = writeln!(out, "{}:", doc_type);
        for (year, counter) in years {
            let _ = writeln!(out, "  {}  {}", year, counter);
        }
    }

    out
}

/// The last `limit` matching events, oldest first. `limit == 0` keeps all.
fn render_history(events: &[AllocationEvent], filter: Option<&DocType>, limit: usize) -> String {
    let matching: Vec<_> = events
        .iter()
        .filter(|event| filter.is_none_or(|f| f.as_str() == event.doc_type))
        .collect();

    let skip = if limit == 0 {
        0
    } else {
        matching.len().saturating_sub(limit)
    };

    let mut out = String::new();
    for event in &matching[skip..] {
        let _ = writeln!(
            out,
            "{}  {}  {}",
            event.ts.format("%Y-%m-%d %H:%M:%S UTC"),
            event.code,
            event.actor
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> CounterStore {
        let mut store = CounterStore::default();
        store.set("INV", 2024, 12);
        store.set("INV", 2025, 8);
        store.set("DEV", 2025, 1);
        store
    }

    fn event(doc_type: &str, counter: u64) -> AllocationEvent {
        let code = format!("{}-2025-0503-{:06}", doc_type, counter);
        AllocationEvent::new(doc_type, 2025, counter, &code)
    }

    #[test]
    fn test_render_counters_all_types_sorted() {
        let out = render_counters(&sample_store(), None);
        assert_eq!(out, "DEV:\n  2025  1\nINV:\n  2024  12\n  2025  8\n");
    }

    #[test]
    fn test_render_counters_filtered() {
        let inv = DocType::parse("inv").unwrap();
        let out = render_counters(&sample_store(), Some(&inv));
        assert_eq!(out, "INV:\n  2024  12\n  2025  8\n");
    }

    #[test]
    fn test_render_counters_empty() {
        assert_eq!(
            render_counters(&CounterStore::default(), None),
            "No numbers issued yet.\n"
        );

        let po = DocType::parse("PO").unwrap();
        assert_eq!(
            render_counters(&sample_store(), Some(&po)),
            "No numbers issued for PO.\n"
        );
    }

    #[test]
    fn test_render_history_limit_keeps_latest() {
        let events = vec![event("INV", 1), event("INV", 2), event("INV", 3)];

        let out = render_history(&events, None, 2);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("INV-2025-0503-000002"));
        assert!(lines[1].contains("INV-2025-0503-000003"));
    }

    #[test]
    fn test_render_history_filter_and_unlimited() {
        let events = vec![event("INV", 1), event("DEV", 1), event("INV", 2)];
        let dev = DocType::parse("dev").unwrap();

        assert_eq!(render_history(&events, None, 0).lines().count(), 3);

        let out = render_history(&events, Some(&dev), 0);
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("DEV-2025-0503-000001"));
    }
}
