//! `floom fill` -- run a form instance: set values, validate, derive.

use anyhow::{Context, Result, anyhow, bail};
use owo_colors::OwoColorize;

use formloom_core::field::FieldDefinition;
use formloom_runtime::FormRuntime;

use crate::cli::FillArgs;
use crate::commands::add::parse_value;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `floom fill` command.
pub fn run(ctx: &RuntimeContext, args: &FillArgs) -> Result<()> {
    let dir = ctx.resolve_dir()?;
    let cfg = ctx.load_config(&dir)?;

    // Instances are transient: either a saved schema or the working form,
    // snapshotted for this run. Nothing here is persisted.
    let (name, fields) = match &args.form_id {
        Some(id) => {
            let store = ctx.open_store(&dir, &cfg);
            let schema = store
                .get(id)
                .ok_or_else(|| anyhow!("form not found: {}", id))?;
            (schema.name.clone(), schema.fields.clone())
        }
        None => {
            let session = ctx.load_session(&dir, &cfg);
            if session.is_empty() {
                bail!("no form to fill; add fields first or pass --form <id>");
            }
            (session.name.clone(), session.registry.fields().to_vec())
        }
    };

    let mut runtime = FormRuntime::new(fields).context("cannot start form instance")?;

    for spec in &args.sets {
        let (target, raw) = spec
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid --set {:?}; expected FIELD=VALUE", spec))?;
        let field = resolve_field(runtime.fields(), target.trim())
            .ok_or_else(|| anyhow!("no field matching {:?}", target.trim()))?;
        let value = parse_value(field.field_type, raw);
        let id = field.id.clone();
        runtime
            .handle_change(&id, value)
            .with_context(|| format!("change to {} failed", id))?;
    }

    let valid = if args.submit {
        runtime.validate_all()
    } else {
        runtime.is_valid()
    };

    if ctx.json {
        output_json(&serde_json::json!({
            "values": runtime.values(),
            "errors": runtime.errors(),
            "valid": valid,
        }));
    } else {
        if !name.is_empty() {
            println!("{}", name.bold());
        }
        for field in runtime.fields() {
            let shown = runtime
                .value(&field.id)
                .map(|v| v.to_text())
                .unwrap_or_default();
            let derived_marker = if field.is_derived { " (derived)" } else { "" };
            match runtime.error(&field.id) {
                Some(error) => println!(
                    "  {}: {}{}  {}",
                    field.label,
                    shown,
                    derived_marker,
                    format!("! {}", error).red()
                ),
                None => println!("  {}: {}{}", field.label, shown, derived_marker),
            }
        }
    }

    if args.submit && !valid {
        bail!("form has {} validation error(s)", runtime.errors().len());
    }
    Ok(())
}

/// Resolves a `--set` target: exact field id first, then exact label.
fn resolve_field<'a>(fields: &'a [FieldDefinition], key: &str) -> Option<&'a FieldDefinition> {
    fields
        .iter()
        .find(|f| f.id == key)
        .or_else(|| fields.iter().find(|f| f.label == key))
}
