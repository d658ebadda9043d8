//! Derived-field evaluation for the formloom system.
//!
//! Derived fields compute their value from other fields' values. Each
//! carries an explicit [`DerivationKind`](formloom_core::enums::DerivationKind)
//! chosen at creation; evaluation walks the dependency graph of the changed
//! field topologically, so only downstream fields are recomputed.

pub mod engine;
pub mod error;
pub mod graph;

pub use engine::{Derivations, recompute_affected, recompute_all};
pub use error::DeriveError;
pub use graph::DependencyGraph;
