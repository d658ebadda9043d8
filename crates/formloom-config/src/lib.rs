//! Configuration management for the formloom system.
//!
//! This crate handles loading and saving `.formloom/config.yaml` files,
//! discovering the `.formloom/` directory in the filesystem, and providing
//! typed access to formloom configuration values.

pub mod config;
pub mod dir;
