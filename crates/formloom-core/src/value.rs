//! Field values -- the scalar-or-string-array values a form instance holds.
//!
//! Validation rules operate on the stringified form of a value, so the
//! coercion helpers here ([`FieldValue::to_text`], [`FieldValue::text_len`],
//! [`FieldValue::is_falsy`]) define the semantics the rule table relies on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field's value in a form instance.
///
/// Serialized untagged: `null`, booleans, numbers, strings, and string
/// arrays map directly to their JSON counterparts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value set.
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Multi-select values (checkbox fields).
    List(Vec<String>),
}

impl FieldValue {
    /// Returns `true` if no value is set.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for the values the rule table treats as "empty":
    /// unset, or the empty string. Zero and `false` are present values.
    pub fn is_unset(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns `true` for values the vacuous-pass rules skip: unset, the
    /// empty string, zero, and `false`. Lists are never falsy, not even
    /// empty ones.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Number(n) => *n == 0.0,
            Self::Text(s) => s.is_empty(),
            Self::List(_) => false,
        }
    }

    /// Stringified form: numbers without a trailing `.0` when integral,
    /// lists joined with commas, unset values as the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Self::Text(s) => s.clone(),
            Self::List(items) => items.join(","),
        }
    }

    /// Character count of the stringified form.
    pub fn text_len(&self) -> usize {
        self.to_text().chars().count()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serde_untagged_roundtrip() {
        let cases = [
            (FieldValue::Null, "null"),
            (FieldValue::Bool(true), "true"),
            (FieldValue::Number(42.0), "42.0"),
            (FieldValue::Text("hi".into()), "\"hi\""),
            (
                FieldValue::List(vec!["a".into(), "b".into()]),
                "[\"a\",\"b\"]",
            ),
        ];
        for (value, json) in cases {
            assert_eq!(serde_json::to_string(&value).unwrap(), json);
            let back: FieldValue = serde_json::from_str(json).unwrap();
            assert_eq!(back, value);
        }
    }

    #[test]
    fn integer_json_deserializes_as_number() {
        let v: FieldValue = serde_json::from_str("7").unwrap();
        assert_eq!(v, FieldValue::Number(7.0));
    }

    #[test]
    fn falsy_values() {
        assert!(FieldValue::Null.is_falsy());
        assert!(FieldValue::Text(String::new()).is_falsy());
        assert!(FieldValue::Number(0.0).is_falsy());
        assert!(FieldValue::Bool(false).is_falsy());
        assert!(!FieldValue::Text("x".into()).is_falsy());
        assert!(!FieldValue::Number(3.0).is_falsy());
        // Lists are never falsy, matching array truthiness in the
        // persisted-document's source conventions.
        assert!(!FieldValue::List(vec![]).is_falsy());
    }

    #[test]
    fn unset_is_narrower_than_falsy() {
        assert!(FieldValue::Null.is_unset());
        assert!(FieldValue::Text(String::new()).is_unset());
        assert!(!FieldValue::Number(0.0).is_unset());
        assert!(!FieldValue::Bool(false).is_unset());
        assert!(!FieldValue::List(vec![]).is_unset());
    }

    #[test]
    fn stringified_forms() {
        assert_eq!(FieldValue::Number(5.0).to_text(), "5");
        assert_eq!(FieldValue::Number(5.5).to_text(), "5.5");
        assert_eq!(FieldValue::Bool(true).to_text(), "true");
        assert_eq!(
            FieldValue::List(vec!["a".into(), "b".into()]).to_text(),
            "a,b"
        );
        assert_eq!(FieldValue::Null.to_text(), "");
    }

    #[test]
    fn text_len_counts_chars() {
        assert_eq!(FieldValue::Text("héllo".into()).text_len(), 5);
        assert_eq!(FieldValue::Number(1234.0).text_len(), 4);
    }
}
