//! Configuration types and loading for the formloom system.
//!
//! The main entry point is [`FormloomConfig`], representing the contents of
//! `.formloom/config.yaml`. Loading merges the YAML file with `FORMLOOM_*`
//! environment overrides; saving writes plain YAML.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the config file inside the `.formloom/` directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// Prefix for environment variable overrides (e.g. `FORMLOOM_ID_LENGTH`).
const ENV_PREFIX: &str = "FORMLOOM_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file contained invalid YAML.
    #[error("failed to serialize config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The merged configuration could not be extracted.
    #[error("invalid configuration: {0}")]
    Extract(#[from] figment::Error),

    /// The `.formloom/` directory was not found.
    #[error("no .formloom directory found (run 'floom init' first)")]
    DirNotFound,
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Strictness switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StrictConfig {
    /// Reject field updates/deletes addressed to unknown ids instead of
    /// silently ignoring them.
    #[serde(default, rename = "unknown-field")]
    pub unknown_field: bool,
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full formloom configuration, corresponding to
/// `.formloom/config.yaml`.
///
/// All fields use `serde` defaults so a partially-specified YAML file
/// deserializes with sensible default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormloomConfig {
    /// Length of the hash portion of generated field and schema ids.
    #[serde(default = "default_id_length", rename = "id-length")]
    pub id_length: usize,

    /// File name of the saved-forms document inside `.formloom/`.
    #[serde(default = "default_store_file", rename = "store-file")]
    pub store_file: String,

    /// Strictness switches.
    #[serde(default)]
    pub strict: StrictConfig,
}

impl Default for FormloomConfig {
    fn default() -> Self {
        Self {
            id_length: default_id_length(),
            store_file: default_store_file(),
            strict: StrictConfig::default(),
        }
    }
}

fn default_id_length() -> usize {
    6
}

fn default_store_file() -> String {
    "forms.json".to_string()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Loads configuration from `config.yaml` inside the given `.formloom/`
/// directory, merged with `FORMLOOM_*` environment overrides (underscores
/// in variable names map to dashes in top-level keys, e.g.
/// `FORMLOOM_STORE_FILE` overrides `store-file`).
///
/// A missing file yields the defaults (still subject to env overrides).
pub fn load_config(formloom_dir: &Path) -> Result<FormloomConfig> {
    let config_path = formloom_dir.join(CONFIG_FILE);

    let figment = Figment::new()
        .merge(Yaml::file(config_path))
        .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().replace('_', "-").into()));

    Ok(figment.extract()?)
}

/// Saves configuration to `config.yaml` inside the given `.formloom/`
/// directory, creating the directory if needed.
pub fn save_config(formloom_dir: &Path, config: &FormloomConfig) -> Result<()> {
    std::fs::create_dir_all(formloom_dir)?;

    let config_path = formloom_dir.join(CONFIG_FILE);
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(config_path, yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
