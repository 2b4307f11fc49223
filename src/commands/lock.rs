//! Implementation of the `lock status` and `lock clear` commands.

use crate::cli::LockClearArgs;
use log::warn;
use seqnum::config::Config;
use seqnum::context::DataContext;
use seqnum::error::{Result, SeqError};
use seqnum::locks::{self, LockInfo, format_age};
use std::fmt::Write;

pub fn cmd_lock_status(ctx: &DataContext) -> Result<()> {
    let config = load_config_or_default(ctx);

    match locks::inspect_lock(ctx, config.lock_stale_after())? {
        None => println!("No active lock."),
        Some(info) => {
            print!("{}", render_lock_info("Active lock:", &info));
            if info.is_stale {
                println!();
                println!(
                    "Note: the lock exceeds the {}s staleness threshold; the next allocation will reclaim it.",
                    config.lock_stale_secs
                );
                println!("Use `seqnum lock clear --force` to remove it now.");
            }
        }
    }

    Ok(())
}

pub fn cmd_lock_clear(ctx: &DataContext, args: LockClearArgs) -> Result<()> {
    // Require --force flag
    if !args.force {
        return Err(SeqError::UserError(
            "refusing to clear lock without --force flag.\n\n\
             Clearing the lock while its holder is still active can issue duplicate numbers.\n\
             Only clear the lock if you are certain the holder has crashed.\n\n\
             To clear the lock, run:\n  seqnum lock clear --force"
                .to_string(),
        ));
    }

    let config = load_config_or_default(ctx);
    let cleared = locks::clear_lock(ctx, config.lock_stale_after())?;

    if !cleared.is_stale {
        warn!("cleared a fresh lock held by {}", cleared.holder());
    }

    print!("{}", render_lock_info("Cleared lock:", &cleared));
    Ok(())
}

/// Lock commands stay usable when `config.yaml` is broken.
fn load_config_or_default(ctx: &DataContext) -> Config {
    Config::load_for(ctx).unwrap_or_else(|e| {
        warn!("{}; using default settings", e);
        Config::default()
    })
}

fn render_lock_info(title: &str, info: &LockInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);

    match &info.metadata {
        Some(meta) => {
            let _ = writeln!(out, "  Owner:      {}", meta.owner);
            if let Some(pid) = meta.pid {
                let _ = writeln!(out, "  PID:        {}", pid);
            }
            let _ = writeln!(
                out,
                "  Created:    {}",
                meta.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            let _ = writeln!(out, "  Purpose:    {}", meta.purpose);
        }
        None => {
            let _ = writeln!(out, "  Owner:      unknown (unreadable metadata)");
        }
    }

    let _ = writeln!(out, "  Age:        {}", format_age(info.age));
    if info.is_stale {
        let _ = writeln!(out, "  Status:     STALE");
    }
    let _ = writeln!(out, "  Path:       {}", info.path.display());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqnum::locks::LockMetadata;
    use std::path::PathBuf;
    use std::time::Duration;

    fn info(metadata: Option<LockMetadata>, is_stale: bool) -> LockInfo {
        LockInfo {
            path: PathBuf::from("/data/sequences.json.lock"),
            metadata,
            age: Duration::from_secs(192),
            is_stale,
        }
    }

    #[test]
    fn test_render_lock_info_with_metadata() {
        let mut meta = LockMetadata::new("next_number INV");
        meta.owner = "anna@office-pc".to_string();
        meta.pid = Some(4242);

        let out = render_lock_info("Active lock:", &info(Some(meta), false));

        assert!(out.starts_with("Active lock:\n"));
        assert!(out.contains("  Owner:      anna@office-pc\n"));
        assert!(out.contains("  PID:        4242\n"));
        assert!(out.contains("  Purpose:    next_number INV\n"));
        assert!(out.contains("  Age:        3m 12s\n"));
        assert!(!out.contains("STALE"));
    }

    #[test]
    fn test_render_lock_info_unreadable_and_stale() {
        let out = render_lock_info("Cleared lock:", &info(None, true));

        assert!(out.contains("unknown (unreadable metadata)"));
        assert!(out.contains("  Status:     STALE\n"));
        assert!(out.contains("sequences.json.lock"));
    }

    #[test]
    fn test_clear_requires_force() {
        let ctx = DataContext::new("/nonexistent/seqnum-data");
        let err = cmd_lock_clear(&ctx, LockClearArgs { force: false }).unwrap_err();

        assert!(matches!(err, SeqError::UserError(_)));
        assert!(err.to_string().contains("--force"));
    }
}
