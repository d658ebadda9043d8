//! Live form instances for the formloom system.
//!
//! A [`FormRuntime`] holds one instance of a schema: the value map and the
//! error map, orchestrating validation and derivation on every change.

pub mod runtime;

pub use runtime::FormRuntime;
