//! `floom drop` -- delete a saved schema.

use anyhow::{Context, Result};

use crate::cli::DropArgs;
use crate::context::RuntimeContext;

/// Execute the `floom drop` command.
pub fn run(ctx: &RuntimeContext, args: &DropArgs) -> Result<()> {
    let dir = ctx.resolve_dir()?;
    let cfg = ctx.load_config(&dir)?;
    let mut store = ctx.open_store(&dir, &cfg);

    store
        .delete_form(&args.id)
        .with_context(|| format!("cannot drop form {}", args.id))?;

    if !ctx.quiet && !ctx.json {
        println!("Dropped form: {}", args.id);
    }
    Ok(())
}
