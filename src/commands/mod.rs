//! Command implementations for seqnum.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command works on the data directory selected by
//! `--data-dir`.

mod allocate;
mod lock;
mod show;

use crate::cli::{Cli, Command, LockAction, LockCommand};
use log::debug;
use seqnum::context::DataContext;
use seqnum::error::Result;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = DataContext::resolve(Some(&cli.data_dir))?;
    debug!("using data directory {}", ctx.data_dir.display());

    match cli.command {
        Command::Next(args) => allocate::cmd_next(&ctx, args),
        Command::Number(args) => allocate::cmd_number(&ctx, args),
        Command::Initials(args) => allocate::cmd_initials(args),
        Command::Show(args) => show::cmd_show(&ctx, args),
        Command::History(args) => show::cmd_history(&ctx, args),
        Command::Lock(lock_cmd) => dispatch_lock(&ctx, lock_cmd),
    }
}

/// Dispatch lock subcommands.
fn dispatch_lock(ctx: &DataContext, lock_cmd: LockCommand) -> Result<()> {
    match lock_cmd.action {
        LockAction::Status => lock::cmd_lock_status(ctx),
        LockAction::Clear(args) => lock::cmd_lock_clear(ctx, args),
    }
}
