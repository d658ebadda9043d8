//! The ordered field list of the form being edited -- CRUD + reorder.

use chrono::Utc;

use crate::field::FieldDefinition;
use crate::idgen;

/// How mutations addressed to an unknown field id behave.
///
/// [`Ignore`] keeps such calls silent no-ops; [`Reject`] surfaces a
/// [`RegistryError::UnknownField`] instead and is selected through config.
///
/// [`Ignore`]: MissingIdPolicy::Ignore
/// [`Reject`]: MissingIdPolicy::Reject
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingIdPolicy {
    /// Silently ignore the mutation.
    #[default]
    Ignore,
    /// Fail the mutation with an error.
    Reject,
}

/// Error type for registry mutations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no field with id {id}")]
    UnknownField { id: String },

    #[error("index {index} out of bounds for field list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// The ordered list of field definitions for one working form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRegistry {
    fields: Vec<FieldDefinition>,
    policy: MissingIdPolicy,
    id_length: usize,
}

impl FieldRegistry {
    /// Creates an empty registry with the default (permissive) policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with existing fields, keeping their ids.
    ///
    /// Used when loading a saved schema into a working session.
    pub fn from_fields(fields: Vec<FieldDefinition>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Sets the unknown-id policy, consuming the registry.
    pub fn with_policy(mut self, policy: MissingIdPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the unknown-id policy in place.
    pub fn set_policy(&mut self, policy: MissingIdPolicy) {
        self.policy = policy;
    }

    /// The active unknown-id policy.
    pub fn policy(&self) -> MissingIdPolicy {
        self.policy
    }

    /// Overrides the generated-id hash length (0 keeps the default).
    pub fn set_id_length(&mut self, length: usize) {
        self.id_length = length;
    }

    fn effective_id_length(&self) -> usize {
        if self.id_length == 0 {
            idgen::DEFAULT_ID_LENGTH
        } else {
            self.id_length
        }
    }

    /// Assigns a fresh unique id to `field`, appends it to the end of the
    /// list, and returns the id. Never fails; any id already on the
    /// definition is replaced.
    pub fn add_field(&mut self, mut field: FieldDefinition) -> String {
        let id = idgen::unique_id(
            idgen::FIELD_PREFIX,
            &field.label,
            Utc::now(),
            self.effective_id_length(),
            |candidate| self.fields.iter().any(|f| f.id == candidate),
        );
        field.id = id.clone();
        self.fields.push(field);
        id
    }

    /// Replaces the entry whose id matches `field.id`, preserving its
    /// position. Unknown ids follow the configured [`MissingIdPolicy`].
    pub fn update_field(&mut self, field: FieldDefinition) -> Result<(), RegistryError> {
        match self.fields.iter().position(|f| f.id == field.id) {
            Some(index) => {
                self.fields[index] = field;
                Ok(())
            }
            None => self.missing(&field.id),
        }
    }

    /// Removes the entry with the given id. Unknown ids follow the
    /// configured [`MissingIdPolicy`].
    pub fn delete_field(&mut self, id: &str) -> Result<(), RegistryError> {
        match self.fields.iter().position(|f| f.id == id) {
            Some(index) => {
                self.fields.remove(index);
                Ok(())
            }
            None => self.missing(id),
        }
    }

    /// Moves the field at `source` to `destination`, shifting the fields in
    /// between. Both indices must lie in `[0, len)`.
    pub fn reorder_field(&mut self, source: usize, destination: usize) -> Result<(), RegistryError> {
        let len = self.fields.len();
        for index in [source, destination] {
            if index >= len {
                return Err(RegistryError::IndexOutOfBounds { index, len });
            }
        }
        let field = self.fields.remove(source);
        self.fields.insert(destination, field);
        Ok(())
    }

    fn missing(&self, id: &str) -> Result<(), RegistryError> {
        match self.policy {
            MissingIdPolicy::Ignore => Ok(()),
            MissingIdPolicy::Reject => Err(RegistryError::UnknownField { id: id.to_owned() }),
        }
    }

    /// The fields in order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Looks a field up by id.
    pub fn get(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Removes every field.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDefinition> {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::FieldType;
    use crate::field::FieldBuilder;

    fn text_field(label: &str) -> FieldDefinition {
        FieldBuilder::new(label, FieldType::Text).build()
    }

    #[test]
    fn add_assigns_unique_ids_and_appends() {
        let mut reg = FieldRegistry::new();
        let a = reg.add_field(text_field("Name"));
        let b = reg.add_field(text_field("Name"));

        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.fields()[0].id, a);
        assert_eq!(reg.fields()[1].id, b);
        assert!(a.starts_with("fld-"));
    }

    #[test]
    fn add_then_delete_restores_list() {
        let mut reg = FieldRegistry::new();
        reg.add_field(text_field("Keep"));
        let before = reg.fields().to_vec();

        let id = reg.add_field(text_field("Transient"));
        reg.delete_field(&id).unwrap();

        assert_eq!(reg.fields(), before.as_slice());
    }

    #[test]
    fn update_preserves_position() {
        let mut reg = FieldRegistry::new();
        reg.add_field(text_field("First"));
        let id = reg.add_field(text_field("Second"));
        reg.add_field(text_field("Third"));

        let mut updated = reg.get(&id).unwrap().clone();
        updated.label = "Renamed".into();
        reg.update_field(updated).unwrap();

        assert_eq!(reg.fields()[1].label, "Renamed");
        assert_eq!(reg.fields()[1].id, id);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn unknown_id_is_ignored_by_default() {
        let mut reg = FieldRegistry::new();
        reg.add_field(text_field("Only"));

        let mut ghost = text_field("Ghost");
        ghost.id = "fld-nosuch".into();
        assert!(reg.update_field(ghost).is_ok());
        assert!(reg.delete_field("fld-nosuch").is_ok());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn unknown_id_rejected_under_strict_policy() {
        let mut reg = FieldRegistry::new().with_policy(MissingIdPolicy::Reject);
        reg.add_field(text_field("Only"));

        match reg.delete_field("fld-nosuch") {
            Err(RegistryError::UnknownField { id }) => assert_eq!(id, "fld-nosuch"),
            other => panic!("expected UnknownField, got {:?}", other),
        }
    }

    #[test]
    fn reorder_roundtrip_restores_order() {
        let mut reg = FieldRegistry::new();
        for label in ["A", "B", "C", "D"] {
            reg.add_field(text_field(label));
        }
        let before: Vec<String> = reg.iter().map(|f| f.id.clone()).collect();

        for (i, j) in [(0, 3), (1, 2), (3, 0)] {
            reg.reorder_field(i, j).unwrap();
            reg.reorder_field(j, i).unwrap();
            let after: Vec<String> = reg.iter().map(|f| f.id.clone()).collect();
            assert_eq!(after, before, "roundtrip ({i}, {j}) changed the order");
        }
    }

    #[test]
    fn reorder_moves_and_shifts() {
        let mut reg = FieldRegistry::new();
        for label in ["A", "B", "C"] {
            reg.add_field(text_field(label));
        }
        reg.reorder_field(0, 2).unwrap();
        let labels: Vec<&str> = reg.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["B", "C", "A"]);
    }

    #[test]
    fn reorder_out_of_bounds_fails() {
        let mut reg = FieldRegistry::new();
        reg.add_field(text_field("Only"));

        assert!(matches!(
            reg.reorder_field(1, 0),
            Err(RegistryError::IndexOutOfBounds { index: 1, len: 1 })
        ));
        assert!(matches!(
            reg.reorder_field(0, 5),
            Err(RegistryError::IndexOutOfBounds { index: 5, len: 1 })
        ));
    }

    #[test]
    fn from_fields_keeps_existing_ids() {
        let mut reg = FieldRegistry::new();
        reg.add_field(text_field("A"));
        reg.add_field(text_field("B"));
        let fields = reg.fields().to_vec();

        let restored = FieldRegistry::from_fields(fields.clone());
        assert_eq!(restored.fields(), fields.as_slice());
    }
}
