//! `floom show` -- show one field of the working form in detail.

use anyhow::{Result, bail};

use crate::cli::ShowArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, print_field_details};

/// Execute the `floom show` command.
pub fn run(ctx: &RuntimeContext, args: &ShowArgs) -> Result<()> {
    let dir = ctx.resolve_dir()?;
    let cfg = ctx.load_config(&dir)?;
    let session = ctx.load_session(&dir, &cfg);

    let Some(field) = session.registry.get(&args.id) else {
        bail!("no field with id {}", args.id);
    };

    if ctx.json {
        output_json(field);
    } else {
        print_field_details(field);
    }
    Ok(())
}
