//! `floom delete` -- delete a field from the working form.

use anyhow::{Context, Result};

use crate::cli::DeleteArgs;
use crate::context::RuntimeContext;

/// Execute the `floom delete` command.
pub fn run(ctx: &RuntimeContext, args: &DeleteArgs) -> Result<()> {
    let dir = ctx.resolve_dir()?;
    let cfg = ctx.load_config(&dir)?;
    let mut session = ctx.load_session(&dir, &cfg);

    let existed = session.registry.get(&args.id).is_some();
    session
        .registry
        .delete_field(&args.id)
        .with_context(|| format!("cannot delete field {}", args.id))?;
    ctx.save_session(&dir, &session)?;

    if !ctx.quiet && !ctx.json {
        if existed {
            println!("Deleted field: {}", args.id);
        } else {
            println!("No field with id {} (nothing to delete)", args.id);
        }
    }
    Ok(())
}
