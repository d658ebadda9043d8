//! `floom list` -- list the fields of the working form.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::{field_line, output_json};

/// Execute the `floom list` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let dir = ctx.resolve_dir()?;
    let cfg = ctx.load_config(&dir)?;
    let session = ctx.load_session(&dir, &cfg);

    if ctx.json {
        output_json(&session.registry.fields());
        return Ok(());
    }

    if session.is_empty() {
        println!("No fields in the working form.");
        return Ok(());
    }

    if !session.name.is_empty() {
        println!("Working form: {}", session.name);
    }
    for (index, field) in session.registry.iter().enumerate() {
        println!("{}", field_line(index, field));
    }
    Ok(())
}
