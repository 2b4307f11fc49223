//! CLI argument parsing for seqnum.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Seqnum: crash-safe sequential document numbers.
///
/// Issues codes of the form TYPE-YYYY-DDMM-NNNNNN with one counter per
/// document type and year, shared safely between concurrent processes
/// through a lock file next to the counter store.
#[derive(Parser, Debug)]
#[command(name = "seqnum")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding sequences.json, its lock and config.yaml.
    #[arg(long, global = true, default_value = "Data")]
    pub data_dir: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for seqnum.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Allocate the next number for a document type.
    ///
    /// Prints the formatted code, e.g. INV-2025-0503-000008.
    Next(NextArgs),

    /// Allocate a number and append the initials of a name.
    ///
    /// Prints e.g. DEV-2025-0503-000001-JLP.
    Number(NumberArgs),

    /// Print the initials of a name without allocating anything.
    Initials(InitialsArgs),

    /// Show the last issued counters per type and year.
    Show(ShowArgs),

    /// Show recorded allocations from the audit log.
    History(HistoryArgs),

    /// Lock management commands.
    ///
    /// Inspect or clear the store lock.
    Lock(LockCommand),
}

/// Arguments for the `next` command.
#[derive(Parser, Debug)]
pub struct NextArgs {
    /// Document type (A-Z, 0-9, '-', '_'; case-insensitive).
    pub doc_type: String,

    /// Zero-padded counter width. Defaults to `default_width` from config.
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Print "COUNTER<TAB>CODE" instead of the code alone.
    #[arg(long)]
    pub with_counter: bool,
}

/// Arguments for the `number` command.
#[derive(Parser, Debug)]
pub struct NumberArgs {
    /// Document type (A-Z, 0-9, '-', '_'; case-insensitive).
    pub doc_type: String,

    /// Customer or contact name; words are joined with spaces.
    #[arg(num_args = 0.., trailing_var_arg = true)]
    pub name: Vec<String>,
}

/// Arguments for the `initials` command.
#[derive(Parser, Debug)]
pub struct InitialsArgs {
    /// Name to take initials from; words are joined with spaces.
    #[arg(num_args = 0.., trailing_var_arg = true)]
    pub name: Vec<String>,

    /// Keep accented letters instead of reducing them to ASCII.
    #[arg(long)]
    pub keep_accents: bool,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Only show this document type.
    pub doc_type: Option<String>,
}

/// Arguments for the `history` command.
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Only show this document type.
    pub doc_type: Option<String>,

    /// Show at most the last N entries (0 shows all).
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,
}

/// Lock subcommands.
#[derive(Parser, Debug)]
pub struct LockCommand {
    #[command(subcommand)]
    pub action: LockAction,
}

/// Available lock actions.
#[derive(Subcommand, Debug)]
pub enum LockAction {
    /// Show whether the store lock is held, by whom, and for how long.
    Status,

    /// Remove the store lock.
    ///
    /// Requires --force flag to prevent accidental clearing.
    Clear(LockClearArgs),
}

/// Arguments for the `lock clear` command.
#[derive(Parser, Debug)]
pub struct LockClearArgs {
    /// Force clearing the lock (required for safety).
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
