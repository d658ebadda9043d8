//! `floom add` -- add a field to the working form.

use anyhow::{Context, Result, bail};

use formloom_core::enums::{DerivationKind, FieldType};
use formloom_core::field::FieldBuilder;
use formloom_core::value::FieldValue;

use crate::cli::AddArgs;
use crate::commands::parse_rule_spec;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `floom add` command.
pub fn run(ctx: &RuntimeContext, args: &AddArgs) -> Result<()> {
    if args.label.trim().is_empty() {
        bail!("field label must not be empty");
    }

    let field_type: FieldType = args.field_type.parse()?;

    let mut builder = FieldBuilder::new(args.label.trim(), field_type).required(args.required);

    if let Some(ref default) = args.default {
        builder = builder.default_value(parse_value(field_type, default));
    }
    for option in &args.options {
        builder = builder.option(option.clone());
    }
    for spec in &args.rules {
        builder = builder.rule(parse_rule_spec(spec)?);
    }

    let is_derived = !args.derived_from.is_empty()
        || args.formula.is_some()
        || args.derivation.is_some();
    if is_derived {
        builder = builder.derived(
            args.derived_from.clone(),
            args.formula.clone().unwrap_or_default(),
        );
        if let Some(ref kind) = args.derivation {
            builder = builder.derivation_kind(DerivationKind::from(kind.as_str()));
        }
    }

    let field = builder.build();

    let dir = ctx.resolve_dir()?;
    let cfg = ctx.load_config(&dir)?;
    let mut session = ctx.load_session(&dir, &cfg);

    let id = session.registry.add_field(field);
    ctx.save_session(&dir, &session)?;

    let field = session
        .registry
        .get(&id)
        .context("freshly added field should exist")?;
    if ctx.json {
        output_json(field);
    } else if ctx.quiet {
        println!("{}", id);
    } else {
        println!("Added field: {}", id);
        println!("  Label: {}", field.label);
        println!("  Type: {}", field.field_type);
        if field.is_derived {
            println!("  Derived from: {}", field.derived_from.join(", "));
        }
    }
    Ok(())
}

/// Interprets a raw CLI value for the given field type: checkbox values
/// split on commas, number fields parse numerically when they can.
pub fn parse_value(field_type: FieldType, raw: &str) -> FieldValue {
    if field_type.is_multi_valued() {
        return FieldValue::List(
            raw.split(',')
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect(),
        );
    }
    if field_type == FieldType::Number {
        if let Ok(n) = raw.trim().parse::<f64>() {
            return FieldValue::Number(n);
        }
    }
    FieldValue::Text(raw.to_owned())
}
