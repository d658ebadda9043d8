//! `floom move` -- move a field to a new position in the working form.

use anyhow::{Context, Result};

use crate::cli::MoveArgs;
use crate::context::RuntimeContext;

/// Execute the `floom move` command.
pub fn run(ctx: &RuntimeContext, args: &MoveArgs) -> Result<()> {
    let dir = ctx.resolve_dir()?;
    let cfg = ctx.load_config(&dir)?;
    let mut session = ctx.load_session(&dir, &cfg);

    session
        .registry
        .reorder_field(args.source, args.destination)
        .context("cannot move field")?;
    ctx.save_session(&dir, &session)?;

    if !ctx.quiet && !ctx.json {
        println!("Moved field {} -> {}", args.source, args.destination);
    }
    Ok(())
}
