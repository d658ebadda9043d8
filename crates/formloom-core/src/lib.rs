//! Core types and the validation engine for the formloom system.
//!
//! This crate contains the field data model, id generation, the ordered
//! field registry, and the per-field validation rule evaluator.

pub mod enums;
pub mod field;
pub mod idgen;
pub mod registry;
pub mod validation;
pub mod value;
