//! Saved form schemas -- immutable, named, timestamped snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use formloom_core::enums::FieldType;
use formloom_core::field::FieldDefinition;

/// A saved form schema.
///
/// Created only by a successful save; the field list is a deep snapshot
/// detached from any live session and is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: String,
    pub name: String,
    /// Creation timestamp, serialized as an ISO-8601 string.
    pub created_at: DateTime<Utc>,
    pub fields: Vec<FieldDefinition>,
}

impl FormSchema {
    /// Returns `true` if any field is marked required.
    pub fn has_required_fields(&self) -> bool {
        self.fields.iter().any(|f| f.required)
    }

    /// Returns `true` if any field is derived.
    pub fn has_derived_fields(&self) -> bool {
        self.fields.iter().any(|f| f.is_derived)
    }

    /// The distinct field types used, in first-appearance order.
    pub fn field_types(&self) -> Vec<FieldType> {
        let mut types = Vec::new();
        for field in &self.fields {
            if !types.contains(&field.field_type) {
                types.push(field.field_type);
            }
        }
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formloom_core::enums::FieldType;
    use formloom_core::field::FieldBuilder;
    use pretty_assertions::assert_eq;

    fn schema(fields: Vec<FieldDefinition>) -> FormSchema {
        FormSchema {
            id: "frm-abc123".into(),
            name: "Intake".into(),
            created_at: Utc::now(),
            fields,
        }
    }

    #[test]
    fn serde_roundtrip_with_iso_timestamp() {
        let s = schema(vec![FieldBuilder::new("Name", FieldType::Text).build()]);

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["id"], "frm-abc123");
        assert_eq!(json["name"], "Intake");
        assert!(
            json["createdAt"].as_str().unwrap().contains('T'),
            "createdAt should be an ISO-8601 string"
        );
        assert!(json["fields"].is_array());

        let back: FormSchema = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn summary_helpers() {
        let s = schema(vec![
            FieldBuilder::new("Name", FieldType::Text).required(true).build(),
            FieldBuilder::new("Birthdate", FieldType::Date).build(),
            FieldBuilder::new("Age", FieldType::Number)
                .derived(vec!["fld-x".into()], "age from birthdate")
                .build(),
            FieldBuilder::new("Nick", FieldType::Text).build(),
        ]);

        assert!(s.has_required_fields());
        assert!(s.has_derived_fields());
        assert_eq!(
            s.field_types(),
            vec![FieldType::Text, FieldType::Date, FieldType::Number]
        );
    }
}
