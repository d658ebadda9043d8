//! `floom edit` -- edit a field of the working form.

use anyhow::{Context, Result};

use formloom_core::enums::FieldType;

use crate::cli::EditArgs;
use crate::commands::parse_rule_spec;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `floom edit` command.
pub fn run(ctx: &RuntimeContext, args: &EditArgs) -> Result<()> {
    let dir = ctx.resolve_dir()?;
    let cfg = ctx.load_config(&dir)?;
    let mut session = ctx.load_session(&dir, &cfg);

    // Fetch-modify-replace: the registry's update preserves position. An
    // unknown id is a silent no-op unless strict.unknown-field is set, so
    // mirror that split here: without a fetched field there is nothing to
    // apply the edits to.
    let Some(mut field) = session.registry.get(&args.id).cloned() else {
        let mut ghost = formloom_core::field::FieldDefinition::default();
        ghost.id = args.id.clone();
        session
            .registry
            .update_field(ghost)
            .with_context(|| format!("cannot edit field {}", args.id))?;
        if !ctx.quiet && !ctx.json {
            println!("No field with id {} (nothing to edit)", args.id);
        }
        return Ok(());
    };

    if let Some(ref label) = args.label {
        field.label = label.clone();
    }
    if let Some(ref t) = args.field_type {
        field.field_type = t.parse::<FieldType>()?;
    }
    if let Some(required) = args.required {
        field.required = required;
    }
    if let Some(ref default) = args.default {
        field.default_value = super::add::parse_value(field.field_type, default);
    }
    if !args.options.is_empty() {
        field.options = args.options.clone();
    }
    if args.clear_rules {
        field.validation_rules.clear();
    }
    if !args.rules.is_empty() {
        field.validation_rules = args
            .rules
            .iter()
            .map(|spec| parse_rule_spec(spec))
            .collect::<Result<Vec<_>>>()?;
    }

    session
        .registry
        .update_field(field)
        .with_context(|| format!("cannot edit field {}", args.id))?;
    ctx.save_session(&dir, &session)?;

    if ctx.json {
        output_json(session.registry.get(&args.id).context("edited field")?);
    } else if !ctx.quiet {
        println!("Updated field: {}", args.id);
    }
    Ok(())
}
