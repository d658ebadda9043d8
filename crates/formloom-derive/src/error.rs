//! Derivation error types.

/// Errors raised while computing derived fields.
///
/// [`CycleDetected`](DeriveError::CycleDetected) fails the whole pass; the
/// per-field variants are caught by the evaluation loop, logged, and leave
/// only that field's value unset.
#[derive(Debug, thiserror::Error)]
pub enum DeriveError {
    /// The derived-field dependency graph contains a cycle.
    #[error("cycle detected in derived-field dependencies")]
    CycleDetected,

    /// A derived field declares no dependencies to compute from.
    #[error("derived field {field} has no dependencies")]
    NoDependencies {
        /// Id of the derived field.
        field: String,
    },

    /// A dependency value could not be parsed as a date.
    #[error("cannot parse {value:?} as a date")]
    InvalidDate {
        /// The offending raw value.
        value: String,
    },
}
