//! `floom save` -- save the working form as a named schema.

use anyhow::{Context, Result, bail};

use crate::cli::SaveArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `floom save` command.
pub fn run(ctx: &RuntimeContext, args: &SaveArgs) -> Result<()> {
    let dir = ctx.resolve_dir()?;
    let cfg = ctx.load_config(&dir)?;
    let mut session = ctx.load_session(&dir, &cfg);

    // Caller-side preconditions: a name and at least one field.
    let name = args.name.trim();
    if name.is_empty() {
        bail!("form name must not be empty");
    }
    if session.is_empty() {
        bail!("the working form has no fields; add some before saving");
    }

    let mut store = ctx.open_store(&dir, &cfg);
    let field_count = session.registry.len();
    let id = store
        .save_form(&mut session, name)
        .context("failed to save form")?;

    // Persist the (now cleared) draft only after the store write succeeded,
    // so a failed save leaves the draft on disk for retry.
    ctx.save_session(&dir, &session)?;

    if ctx.json {
        output_json(&serde_json::json!({ "id": id, "name": name }));
    } else if ctx.quiet {
        println!("{}", id);
    } else {
        println!("Saved form: {} ({} field(s)) as {}", name, field_count, id);
    }
    Ok(())
}
