//! Store error types.

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No saved schema has the requested id.
    #[error("form not found: {id}")]
    FormNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// Saving requires a non-empty name.
    #[error("form name must not be empty")]
    EmptyName,

    /// Saving requires a working form with at least one field.
    #[error("cannot save a form with no fields")]
    EmptyForm,

    /// Reading or writing the document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the store crate.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Returns `true` if this is a [`StoreError::FormNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FormNotFound { .. })
    }
}
