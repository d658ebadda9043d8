//! Output formatting helpers for the `floom` CLI.

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;

use formloom_core::field::FieldDefinition;
use formloom_store::FormSchema;

/// Prints a value as pretty JSON to stdout.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Error: failed to serialize output: {}", e),
    }
}

/// `2026-08-07 14:30` style timestamp for listings.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// One-line field summary: `0. Name [text] (fld-abc123) *`.
pub fn field_line(index: usize, field: &FieldDefinition) -> String {
    let mut line = format!(
        "{:>2}. {} [{}] ({})",
        index,
        field.label.bold(),
        field.field_type.as_str().cyan(),
        field.id.dimmed(),
    );
    if field.required {
        line.push_str(&format!(" {}", "*".red()));
    }
    if field.is_derived {
        line.push_str(&format!(" {}", "derived".yellow()));
    }
    line
}

/// Multi-line field detail block.
pub fn print_field_details(field: &FieldDefinition) {
    println!("{} ({})", field.label.bold(), field.id.dimmed());
    println!("  Type: {}", field.field_type);
    println!("  Required: {}", field.required);
    if !field.default_value.is_null() {
        println!("  Default: {}", field.default_value);
    }
    if !field.options.is_empty() {
        println!("  Options: {}", field.options.join(", "));
    }
    if !field.validation_rules.is_empty() {
        println!("  Rules:");
        for rule in &field.validation_rules {
            match rule.value {
                Some(v) => println!("    - {}: {} ({})", rule.rule_type, v, rule.message),
                None => println!("    - {} ({})", rule.rule_type, rule.message),
            }
        }
    }
    if field.is_derived {
        println!("  Derived from: {}", field.derived_from.join(", "));
        if let Some(ref kind) = field.derivation {
            println!("  Derivation: {}", kind);
        }
        if !field.derived_formula.is_empty() {
            println!("  Formula: {}", field.derived_formula);
        }
    }
}

/// One-line saved-form summary for `floom forms`.
pub fn form_line(schema: &FormSchema) -> String {
    let mut markers = Vec::new();
    if schema.has_required_fields() {
        markers.push("required");
    }
    if schema.has_derived_fields() {
        markers.push("derived");
    }
    let marker_text = if markers.is_empty() {
        String::new()
    } else {
        format!(" [{}]", markers.join(", "))
    };

    format!(
        "{} {} -- {} field(s), created {}{}",
        schema.id.dimmed(),
        schema.name.bold(),
        schema.fields.len(),
        format_timestamp(&schema.created_at),
        marker_text.yellow(),
    )
}
