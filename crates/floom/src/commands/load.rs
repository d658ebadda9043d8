//! `floom load` -- load a saved schema into the working form.

use anyhow::{Context, Result};

use crate::cli::LoadArgs;
use crate::context::RuntimeContext;

/// Execute the `floom load` command.
pub fn run(ctx: &RuntimeContext, args: &LoadArgs) -> Result<()> {
    let dir = ctx.resolve_dir()?;
    let cfg = ctx.load_config(&dir)?;
    let mut session = ctx.load_session(&dir, &cfg);

    let store = ctx.open_store(&dir, &cfg);
    store
        .load_form(&args.id, &mut session)
        .with_context(|| format!("cannot load form {}", args.id))?;
    ctx.save_session(&dir, &session)?;

    if !ctx.quiet && !ctx.json {
        println!(
            "Loaded form {} ({} field(s)) into the working form.",
            session.name,
            session.registry.len()
        );
    }
    Ok(())
}
