//! One live run of a schema: values, inline errors, change orchestration.

use std::collections::HashMap;

use formloom_core::field::FieldDefinition;
use formloom_core::validation;
use formloom_core::value::FieldValue;
use formloom_derive::{Derivations, DeriveError, engine};

/// A single form instance.
///
/// Owns a snapshot of the field list for the duration of the run (either
/// the working form or a loaded saved schema being previewed). Instances
/// are runtime-only and never persisted.
pub struct FormRuntime {
    fields: Vec<FieldDefinition>,
    values: HashMap<String, FieldValue>,
    errors: HashMap<String, String>,
    derivations: Derivations,
}

impl FormRuntime {
    /// Creates an instance: seeds values from field defaults and runs one
    /// full derivation pass. Fails if the derived-field dependency graph
    /// has a cycle.
    pub fn new(fields: Vec<FieldDefinition>) -> Result<Self, DeriveError> {
        Self::with_derivations(fields, Derivations::new())
    }

    /// Like [`FormRuntime::new`] with an explicit derivation registry.
    pub fn with_derivations(
        fields: Vec<FieldDefinition>,
        derivations: Derivations,
    ) -> Result<Self, DeriveError> {
        let mut values: HashMap<String, FieldValue> = fields
            .iter()
            .filter(|f| !f.default_value.is_unset())
            .map(|f| (f.id.clone(), f.default_value.clone()))
            .collect();
        engine::recompute_all(&fields, &mut values, &derivations)?;

        Ok(Self {
            fields,
            values,
            errors: HashMap::new(),
            derivations,
        })
    }

    /// Applies a user edit to one field.
    ///
    /// Writes the value, clears the field's previous error, re-validates
    /// only that field against its own rule chain, then runs a derivation
    /// pass scoped to the fields downstream of the change.
    ///
    /// Writes to a derived field are accepted; the next scoped pass
    /// overwrites them when the field's derivation kind is registered.
    pub fn handle_change(
        &mut self,
        field_id: &str,
        value: FieldValue,
    ) -> Result<(), DeriveError> {
        self.errors.remove(field_id);
        if let Some(field) = self.fields.iter().find(|f| f.id == field_id) {
            if let Some(message) = validation::evaluate(field, &value) {
                self.errors.insert(field_id.to_owned(), message.to_owned());
            }
        }
        self.values.insert(field_id.to_owned(), value);

        engine::recompute_affected(&self.fields, field_id, &mut self.values, &self.derivations)
    }

    /// Validates every field (submit-time sweep), replacing the error map.
    /// Returns `true` when the instance is valid.
    pub fn validate_all(&mut self) -> bool {
        self.errors = validation::evaluate_all(&self.fields, &self.values);
        self.errors.is_empty()
    }

    /// The schema snapshot this instance runs.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Current value of a field, if set.
    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.values.get(field_id)
    }

    /// The full value map.
    pub fn values(&self) -> &HashMap<String, FieldValue> {
        &self.values
    }

    /// Current error for a field; `None` means valid.
    pub fn error(&self, field_id: &str) -> Option<&str> {
        self.errors.get(field_id).map(String::as_str)
    }

    /// The full error map.
    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// `true` when no field currently has an error recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
