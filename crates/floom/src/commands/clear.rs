//! `floom clear` -- clear the working form.

use anyhow::Result;

use crate::context::RuntimeContext;

/// Execute the `floom clear` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let dir = ctx.resolve_dir()?;
    let cfg = ctx.load_config(&dir)?;
    let mut session = ctx.load_session(&dir, &cfg);

    session.clear();
    ctx.save_session(&dir, &session)?;

    if !ctx.quiet && !ctx.json {
        println!("Cleared the working form.");
    }
    Ok(())
}
