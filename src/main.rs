//! Seqnum: crash-safe sequential document numbers.
//!
//! This is the main entry point for the `seqnum` CLI. It parses arguments,
//! sets up logging, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

mod cli;
mod commands;

use cli::Cli;
use log::LevelFilter;
use seqnum::exit_codes;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);
            if err.is_retryable() {
                eprintln!("Nothing was allocated; run the command again once the store is free.");
            }

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Warnings by default; `-v` for debug, `-vv` for trace. `RUST_LOG` overrides both.
///
/// Logs go to stderr so stdout carries only the issued codes.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let result = env_logger::builder()
        .filter_level(level)
        .write_style(env_logger::fmt::WriteStyle::Auto)
        .target(env_logger::fmt::Target::Stderr)
        .parse_env(env_logger::Env::default())
        .try_init();
    if let Err(e) = result {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }
}
