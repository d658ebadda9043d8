//! `floom forms` -- list saved forms.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::{form_line, output_json};

/// Execute the `floom forms` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let dir = ctx.resolve_dir()?;
    let cfg = ctx.load_config(&dir)?;
    let store = ctx.open_store(&dir, &cfg);

    if ctx.json {
        output_json(&store.forms());
        return Ok(());
    }

    if store.forms().is_empty() {
        println!("No saved forms yet.");
        return Ok(());
    }

    println!("Saved forms ({}):", store.forms().len());
    for schema in store.forms() {
        println!("  {}", form_line(schema));
    }
    Ok(())
}
