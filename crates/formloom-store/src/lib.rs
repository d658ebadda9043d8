//! Persistence for the formloom system.
//!
//! Saved schemas live in a single JSON document that is rewritten in full
//! on every change ([`JsonFormStore`]); the working form is an explicit
//! session object ([`FormSession`]) threaded through every operation.

pub mod error;
pub mod schema;
pub mod session;
pub mod store;

// Re-exports for convenience.
pub use error::StoreError;
pub use schema::FormSchema;
pub use session::FormSession;
pub use store::JsonFormStore;
