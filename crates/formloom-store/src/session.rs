//! The working form -- the field list currently being edited.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use formloom_core::field::FieldDefinition;
use formloom_core::registry::FieldRegistry;

use crate::error::Result;
use crate::store::write_atomically;

/// One editing session: a name plus the ordered field list being built.
///
/// Sessions are explicit objects passed into every store operation; there
/// is no process-wide current form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSession {
    pub name: String,
    pub registry: FieldRegistry,
}

/// On-disk shape of a session draft (name + fields only; policy and other
/// registry settings are configuration, not session state).
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionDoc {
    #[serde(default)]
    name: String,
    #[serde(default)]
    fields: Vec<FieldDefinition>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when the working field list is empty.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Unconditionally resets the working form.
    pub fn clear(&mut self) {
        self.name.clear();
        self.registry.clear();
    }
}

impl Serialize for FormSession {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        SessionDoc {
            name: self.name.clone(),
            fields: self.registry.fields().to_vec(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FormSession {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let doc = SessionDoc::deserialize(deserializer)?;
        Ok(Self {
            name: doc.name,
            registry: FieldRegistry::from_fields(doc.fields),
        })
    }
}

/// Reads a session draft from disk.
///
/// A missing or unreadable draft yields a fresh empty session; like the
/// saved-forms document, a bad draft never fails startup.
pub fn load_session(path: &Path) -> FormSession {
    match std::fs::read_to_string(path) {
        Ok(text) if text.trim().is_empty() => FormSession::new(),
        Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "session draft is unreadable; starting fresh");
            FormSession::new()
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => FormSession::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read session draft; starting fresh");
            FormSession::new()
        }
    }
}

/// Writes a session draft to disk atomically.
pub fn save_session(path: &Path, session: &FormSession) -> Result<()> {
    write_atomically(path, session)
}
