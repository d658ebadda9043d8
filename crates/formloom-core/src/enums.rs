//! Enum types for the formloom field model.
//!
//! [`FieldType`] and [`RuleType`] are closed sets serialized as the strings
//! used in the persisted document. [`DerivationKind`] is open: unknown kinds
//! round-trip as `Custom(String)` and are simply never executed.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown enum name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {name}")]
pub struct ParseEnumError {
    /// Which enum was being parsed (e.g. "field type").
    pub kind: &'static str,
    /// The offending input.
    pub name: String,
}

// ---------------------------------------------------------------------------
// FieldType
// ---------------------------------------------------------------------------

/// The input type of a form field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
}

impl FieldType {
    /// All field types, in display order.
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Date,
    ];

    /// Returns the string representation used in the persisted document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
        }
    }

    /// Returns `true` for types whose values come from a fixed option list.
    pub fn needs_options(&self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Checkbox)
    }

    /// Returns `true` for types whose natural value is a string array.
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Self::Checkbox)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| ParseEnumError {
                kind: "field type",
                name: s.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// RuleType
// ---------------------------------------------------------------------------

/// The kind of a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleType {
    Required,
    MinLength,
    MaxLength,
    Email,
    Password,
    NotEmpty,
}

impl RuleType {
    /// All rule types, in display order.
    pub const ALL: [RuleType; 6] = [
        RuleType::Required,
        RuleType::MinLength,
        RuleType::MaxLength,
        RuleType::Email,
        RuleType::Password,
        RuleType::NotEmpty,
    ];

    /// Returns the string representation used in the persisted document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Email => "email",
            Self::Password => "password",
            Self::NotEmpty => "notEmpty",
        }
    }

    /// Human-readable name, used in default failure messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::MinLength => "Minimum Length",
            Self::MaxLength => "Maximum Length",
            Self::Email => "Email Format",
            Self::Password => "Password Rules",
            Self::NotEmpty => "Not Empty",
        }
    }

    /// Returns `true` if the rule carries a numeric bound.
    pub fn has_value(&self) -> bool {
        matches!(self, Self::MinLength | Self::MaxLength)
    }

    /// The failure message used when none is configured.
    pub fn default_message(&self) -> String {
        format!("{} validation failed", self.display_name())
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| ParseEnumError {
                kind: "rule type",
                name: s.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// DerivationKind
// ---------------------------------------------------------------------------

/// Names a derivation function in the derivation registry.
///
/// Kinds are chosen when a field is created. Unknown kinds are preserved as
/// `Custom` so that a schema authored against a richer registry still loads;
/// such fields never receive a computed value here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DerivationKind {
    /// Whole-year difference between today and a date-valued dependency.
    AgeFromDate,
    /// Any other kind name; stored but not executed.
    Custom(String),
}

impl DerivationKind {
    /// Returns the string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::AgeFromDate => "age_from_date",
            Self::Custom(s) => s.as_str(),
        }
    }

    /// Returns `true` if this is a built-in (non-custom) kind.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Creation-time inference for fields authored with only a formula text.
    ///
    /// The only recognized pattern: a formula mentioning `birthdate` maps
    /// to [`DerivationKind::AgeFromDate`]. Anything else has no kind.
    pub fn from_formula_hint(formula: &str) -> Option<Self> {
        if formula.contains("birthdate") {
            Some(Self::AgeFromDate)
        } else {
            None
        }
    }
}

impl fmt::Display for DerivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for DerivationKind {
    fn from(s: &str) -> Self {
        match s {
            "age_from_date" => Self::AgeFromDate,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl From<String> for DerivationKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "age_from_date" => Self::AgeFromDate,
            _ => Self::Custom(s),
        }
    }
}

impl Serialize for DerivationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DerivationKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s))
    }
}
