//! Implementation of the `next`, `number` and `initials` commands.

use crate::cli::{InitialsArgs, NextArgs, NumberArgs};
use seqnum::config::types::MAX_WIDTH;
use seqnum::context::DataContext;
use seqnum::error::{Result, SeqError};
use seqnum::sequence::{Allocation, Sequencer, get_initials};

/// Allocate the next number and print it.
pub fn cmd_next(ctx: &DataContext, args: NextArgs) -> Result<()> {
    let sequencer = Sequencer::open(ctx.clone())?;
    let width = resolve_width(args.width, sequencer.config().default_width)?;

    let allocation = sequencer.next_number(&args.doc_type, width)?;
    println!("{}", render_allocation(&allocation, args.with_counter));

    Ok(())
}

/// Allocate a number with the initials of a name appended and print it.
pub fn cmd_number(ctx: &DataContext, args: NumberArgs) -> Result<()> {
    let sequencer = Sequencer::open(ctx.clone())?;
    let code = sequencer.get_number(&args.doc_type, &args.name.join(" "))?;
    println!("{}", code);

    Ok(())
}

/// Print the initials of a name. Touches no files.
pub fn cmd_initials(args: InitialsArgs) -> Result<()> {
    println!("{}", get_initials(&args.name.join(" "), !args.keep_accents));
    Ok(())
}

/// Explicit `--width` wins over the configured default.
fn resolve_width(requested: Option<usize>, default_width: usize) -> Result<usize> {
    match requested {
        Some(width) if width > MAX_WIDTH => Err(SeqError::UserError(format!(
            "--width must be at most {} (got {})",
            MAX_WIDTH, width
        ))),
        Some(width) => Ok(width),
        None => Ok(default_width),
    }
}

fn render_allocation(allocation: &Allocation, with_counter: bool) -> String {
    if with_counter {
        format!("{}\t{}", allocation.counter, allocation.code)
    } else {
        allocation.code.clone()
    }
}
