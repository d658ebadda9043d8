//! Field definitions -- the central domain model for the formloom system.

use serde::{Deserialize, Serialize};

use crate::enums::{DerivationKind, FieldType, RuleType};
use crate::value::FieldValue;

/// One validation rule attached to a field.
///
/// Rule order within a field is significant: evaluation stops at the first
/// failing rule, so earlier rules decide which message is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// The rule kind (serialized as "type" in JSON).
    #[serde(rename = "type")]
    pub rule_type: RuleType,

    /// Numeric bound for the length rules; unused otherwise.
    #[serde(default)]
    pub value: Option<u32>,

    /// Message reported when the rule fails.
    pub message: String,
}

impl ValidationRule {
    /// Creates a rule with the default failure message and no bound.
    pub fn new(rule_type: RuleType) -> Self {
        Self {
            rule_type,
            value: None,
            message: rule_type.default_message(),
        }
    }

    /// Creates a length rule with the given bound.
    pub fn with_value(rule_type: RuleType, value: u32) -> Self {
        Self {
            rule_type,
            value: Some(value),
            message: rule_type.default_message(),
        }
    }

    /// Replaces the failure message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// One form field.
///
/// Every attribute serializes verbatim into the persisted document; nothing
/// is skipped, so saved schemas are self-describing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Opaque unique identifier, assigned by the registry on creation and
    /// immutable thereafter. Empty until then.
    #[serde(default)]
    pub id: String,

    /// The input type (serialized as "type" in JSON).
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Display label.
    pub label: String,

    /// Display-level required marker. Enforcement happens through a
    /// `required` entry in `validation_rules`, not through this flag.
    #[serde(default)]
    pub required: bool,

    /// Value a fresh form instance starts with.
    #[serde(default)]
    pub default_value: FieldValue,

    /// Ordered rule chain; first violation wins.
    #[serde(default)]
    pub validation_rules: Vec<ValidationRule>,

    /// Choices for select/radio/checkbox fields; meaningless otherwise.
    #[serde(default)]
    pub options: Vec<String>,

    /// When `true`, the field's editable surface is suppressed and its
    /// value comes from the derivation engine.
    #[serde(default)]
    pub is_derived: bool,

    /// Ids of the fields this field's value depends on.
    #[serde(default)]
    pub derived_from: Vec<String>,

    /// Free-text description of the intended computation. Stored verbatim;
    /// execution is driven by `derivation`, never by this text.
    #[serde(default)]
    pub derived_formula: String,

    /// Which derivation function computes this field, if any.
    #[serde(default)]
    pub derivation: Option<DerivationKind>,
}

impl FieldDefinition {
    /// Returns `true` if this field can actually be computed: it is derived
    /// and names a derivation kind.
    pub fn is_computable(&self) -> bool {
        self.is_derived && self.derivation.is_some()
    }
}

/// Builder for constructing a [`FieldDefinition`] with a fluent API.
pub struct FieldBuilder {
    field: FieldDefinition,
}

impl FieldBuilder {
    /// Creates a new builder with the given label and type.
    pub fn new(label: impl Into<String>, field_type: FieldType) -> Self {
        let mut field = FieldDefinition::default();
        field.label = label.into();
        field.field_type = field_type;
        Self { field }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.field.required = required;
        self
    }

    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.field.default_value = value.into();
        self
    }

    pub fn rule(mut self, rule: ValidationRule) -> Self {
        self.field.validation_rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: Vec<ValidationRule>) -> Self {
        self.field.validation_rules = rules;
        self
    }

    pub fn option(mut self, option: impl Into<String>) -> Self {
        self.field.options.push(option.into());
        self
    }

    pub fn options(mut self, options: Vec<String>) -> Self {
        self.field.options = options;
        self
    }

    /// Marks the field as derived from the given dependencies.
    ///
    /// The derivation kind is inferred from the formula text
    /// ([`DerivationKind::from_formula_hint`]); use
    /// [`FieldBuilder::derivation_kind`] to set it explicitly.
    pub fn derived(mut self, from: Vec<String>, formula: impl Into<String>) -> Self {
        let formula = formula.into();
        self.field.is_derived = true;
        self.field.derivation = DerivationKind::from_formula_hint(&formula);
        self.field.derived_from = from;
        self.field.derived_formula = formula;
        self
    }

    /// Sets the derivation kind explicitly, overriding any inferred one.
    pub fn derivation_kind(mut self, kind: DerivationKind) -> Self {
        self.field.is_derived = true;
        self.field.derivation = Some(kind);
        self
    }

    /// Consumes the builder and returns the constructed [`FieldDefinition`].
    pub fn build(self) -> FieldDefinition {
        self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_basic() {
        let field = FieldBuilder::new("Email", FieldType::Text)
            .required(true)
            .rule(ValidationRule::new(RuleType::Required))
            .rule(ValidationRule::new(RuleType::Email))
            .build();

        assert_eq!(field.label, "Email");
        assert_eq!(field.field_type, FieldType::Text);
        assert!(field.required);
        assert_eq!(field.validation_rules.len(), 2);
        assert!(field.id.is_empty());
    }

    #[test]
    fn builder_derived_infers_kind() {
        let field = FieldBuilder::new("Age", FieldType::Number)
            .derived(vec!["fld-abc".into()], "age from birthdate")
            .build();

        assert!(field.is_derived);
        assert_eq!(field.derivation, Some(DerivationKind::AgeFromDate));
        assert_eq!(field.derived_from, vec!["fld-abc"]);
    }

    #[test]
    fn builder_derived_unknown_formula_has_no_kind() {
        let field = FieldBuilder::new("Total", FieldType::Number)
            .derived(vec!["fld-a".into(), "fld-b".into()], "sum of a and b")
            .build();

        assert!(field.is_derived);
        assert_eq!(field.derivation, None);
        assert_eq!(field.derived_formula, "sum of a and b");
    }

    #[test]
    fn serde_uses_camel_case_attribute_names() {
        let field = FieldBuilder::new("Name", FieldType::Text)
            .rule(ValidationRule::with_value(RuleType::MinLength, 3).message("Too short"))
            .build();

        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["label"], "Name");
        assert_eq!(json["defaultValue"], serde_json::Value::Null);
        assert_eq!(json["validationRules"][0]["type"], "minLength");
        assert_eq!(json["validationRules"][0]["value"], 3);
        assert_eq!(json["validationRules"][0]["message"], "Too short");
        assert_eq!(json["isDerived"], false);
        assert_eq!(json["derivedFrom"], serde_json::json!([]));
        assert_eq!(json["derivedFormula"], "");
    }

    #[test]
    fn serde_roundtrip() {
        let field = FieldBuilder::new("Colors", FieldType::Checkbox)
            .options(vec!["red".into(), "green".into()])
            .default_value(vec!["red".to_string()])
            .build();

        let json = serde_json::to_string(&field).unwrap();
        let back: FieldDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn rule_default_message() {
        let rule = ValidationRule::new(RuleType::Email);
        assert_eq!(rule.message, "Email Format validation failed");
        assert_eq!(rule.value, None);
    }
}
