//! Field validation -- ordered rule evaluation with first-failure reporting.
//!
//! All rules except `required` and `notEmpty` pass vacuously on falsy
//! values: an optional field with only a `minLength` rule accepts an empty
//! value. Enforcing "present AND long enough" takes a `required` (or
//! `notEmpty`) rule ahead of the length rule, in that order.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::enums::RuleType;
use crate::field::{FieldDefinition, ValidationRule};
use crate::value::FieldValue;

/// `local@domain.tld` with no whitespace or extra `@`s.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Minimum password length for the `password` rule.
const MIN_PASSWORD_LEN: usize = 8;

/// Evaluates a field's rule chain against a candidate value.
///
/// Rules are checked in list order and evaluation stops at the first
/// failure; later rules are never evaluated against the same value.
/// Returns the failing rule's message, or `None` when every rule passes.
pub fn evaluate<'a>(field: &'a FieldDefinition, value: &FieldValue) -> Option<&'a str> {
    field
        .validation_rules
        .iter()
        .find(|rule| !rule_passes(rule, value))
        .map(|rule| rule.message.as_str())
}

/// Checks a single rule against a value.
pub fn rule_passes(rule: &ValidationRule, value: &FieldValue) -> bool {
    match rule.rule_type {
        RuleType::Required => !value.is_unset(),
        RuleType::NotEmpty => !value.is_null() && !value.to_text().trim().is_empty(),
        RuleType::MinLength => {
            value.is_falsy() || rule.value.is_none_or(|bound| value.text_len() >= bound as usize)
        }
        RuleType::MaxLength => {
            value.is_falsy() || rule.value.is_none_or(|bound| value.text_len() <= bound as usize)
        }
        RuleType::Email => value.is_falsy() || EMAIL_RE.is_match(&value.to_text()),
        RuleType::Password => {
            value.is_falsy() || {
                let text = value.to_text();
                text.chars().count() >= MIN_PASSWORD_LEN
                    && text.chars().any(|c| c.is_ascii_digit())
            }
        }
    }
}

/// Validates every field against the given value map (missing entries are
/// treated as unset). Returns the error map; empty means the form is valid.
pub fn evaluate_all(
    fields: &[FieldDefinition],
    values: &HashMap<String, FieldValue>,
) -> HashMap<String, String> {
    let unset = FieldValue::Null;
    fields
        .iter()
        .filter_map(|field| {
            let value = values.get(&field.id).unwrap_or(&unset);
            evaluate(field, value).map(|msg| (field.id.clone(), msg.to_owned()))
        })
        .collect()
}
