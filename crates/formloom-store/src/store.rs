//! [`JsonFormStore`] -- the saved-forms document.
//!
//! All saved schemas live in one JSON array that is rewritten in full on
//! every change. Writes go through a temp file in the same directory and a
//! rename, so a failed write leaves the previous document intact.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use formloom_core::idgen;

use crate::error::{Result, StoreError};
use crate::schema::FormSchema;
use crate::session::FormSession;

/// Store for saved form schemas, backed by a single JSON document.
pub struct JsonFormStore {
    path: PathBuf,
    forms: Vec<FormSchema>,
    id_length: usize,
}

impl JsonFormStore {
    /// Opens the store, reading the document once.
    ///
    /// A missing document is an empty store. A corrupt or unreadable one
    /// degrades to an empty store with a warning -- startup never fails on
    /// bad persisted state.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let forms = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Vec::new(),
            Ok(text) => match serde_json::from_str(&text) {
                Ok(forms) => forms,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "saved-forms document is unreadable; starting with an empty list"
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "cannot read saved-forms document; starting with an empty list"
                );
                Vec::new()
            }
        };
        debug!(path = %path.display(), count = forms.len(), "opened form store");

        Self {
            path,
            forms,
            id_length: idgen::DEFAULT_ID_LENGTH,
        }
    }

    /// Overrides the generated-id hash length.
    pub fn with_id_length(mut self, length: usize) -> Self {
        if length > 0 {
            self.id_length = length;
        }
        self
    }

    /// The saved schemas, in save order.
    pub fn forms(&self) -> &[FormSchema] {
        &self.forms
    }

    /// Looks a saved schema up by id.
    pub fn get(&self, id: &str) -> Option<&FormSchema> {
        self.forms.iter().find(|f| f.id == id)
    }

    /// The document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshots the session's field list as a new named schema.
    ///
    /// The schema gets a fresh id, a deep copy of the working fields, and
    /// the current timestamp. The whole document is rewritten; only after
    /// the write succeeds is the session cleared. On failure the appended
    /// entry is rolled back and the session left untouched, so the save
    /// can simply be retried.
    pub fn save_form(&mut self, session: &mut FormSession, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if session.is_empty() {
            return Err(StoreError::EmptyForm);
        }

        let now = Utc::now();
        let id = idgen::unique_id(idgen::SCHEMA_PREFIX, name, now, self.id_length, |candidate| {
            self.forms.iter().any(|f| f.id == candidate)
        });
        let schema = FormSchema {
            id: id.clone(),
            name: name.to_owned(),
            created_at: now,
            fields: session.registry.fields().to_vec(),
        };

        self.forms.push(schema);
        if let Err(e) = self.persist() {
            self.forms.pop();
            return Err(e);
        }

        session.clear();
        info!(form = %id, name, "form saved");
        Ok(id)
    }

    /// Copies a saved schema's name and fields into the session as a fresh
    /// editable copy. The stored schema is never aliased; later edits to
    /// the session cannot touch it.
    pub fn load_form(&self, id: &str, session: &mut FormSession) -> Result<()> {
        let schema = self.get(id).ok_or_else(|| StoreError::FormNotFound {
            id: id.to_owned(),
        })?;

        session.name = schema.name.clone();
        let policy = session.registry.policy();
        session.registry =
            formloom_core::registry::FieldRegistry::from_fields(schema.fields.clone())
                .with_policy(policy);
        Ok(())
    }

    /// Removes a saved schema and rewrites the document. Rolled back on
    /// write failure.
    pub fn delete_form(&mut self, id: &str) -> Result<()> {
        let index = self
            .forms
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| StoreError::FormNotFound { id: id.to_owned() })?;

        let removed = self.forms.remove(index);
        if let Err(e) = self.persist() {
            self.forms.insert(index, removed);
            return Err(e);
        }
        info!(form = %id, "form deleted");
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        write_atomically(&self.path, &self.forms)
    }
}

/// Serializes `value` as pretty JSON and writes it to `path` via a temp
/// file in the same directory plus a rename.
pub(crate) fn write_atomically<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            parent
        }
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, value)?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}
