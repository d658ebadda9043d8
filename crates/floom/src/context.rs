//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds the state every command handler needs:
//! resolved `.formloom/` directory, loaded config, and the global output
//! flags. Session drafts and the form store are opened through it so the
//! wiring (paths, policies, id lengths) lives in one place.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use formloom_config::config::{self, FormloomConfig};
use formloom_config::dir;
use formloom_core::registry::MissingIdPolicy;
use formloom_store::session::{self, FormSession};
use formloom_store::JsonFormStore;

/// File name of the working-draft document inside `.formloom/`.
const SESSION_FILE: &str = "session.json";

/// Runtime context passed to every command handler.
pub struct RuntimeContext {
    /// Explicit directory override (`--dir`).
    pub dir: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Builds a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &crate::cli::GlobalArgs) -> Self {
        Self {
            dir: global.dir.as_ref().map(PathBuf::from),
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Resolves the `.formloom/` directory: the `--dir` flag wins,
    /// otherwise discovery walks up from the current directory.
    pub fn resolve_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.dir {
            return Ok(dir.clone());
        }
        let cwd = env::current_dir().context("cannot determine current directory")?;
        let found = dir::find_formloom_dir_or_error(&cwd)
            .context("no .formloom directory found. Run 'floom init' to create one.")?;
        tracing::debug!(dir = %found.display(), "resolved formloom directory");
        Ok(found)
    }

    /// Loads the configuration for the given directory.
    pub fn load_config(&self, formloom_dir: &Path) -> Result<FormloomConfig> {
        config::load_config(formloom_dir).context("failed to load configuration")
    }

    /// Opens the saved-forms store described by the config.
    pub fn open_store(&self, formloom_dir: &Path, cfg: &FormloomConfig) -> JsonFormStore {
        JsonFormStore::open(formloom_dir.join(&cfg.store_file)).with_id_length(cfg.id_length)
    }

    /// Loads the working-draft session, applying the configured policies.
    pub fn load_session(&self, formloom_dir: &Path, cfg: &FormloomConfig) -> FormSession {
        let mut session = session::load_session(&formloom_dir.join(SESSION_FILE));
        session.registry.set_policy(if cfg.strict.unknown_field {
            MissingIdPolicy::Reject
        } else {
            MissingIdPolicy::Ignore
        });
        session.registry.set_id_length(cfg.id_length);
        session
    }

    /// Writes the working-draft session back to disk.
    pub fn save_session(&self, formloom_dir: &Path, session: &FormSession) -> Result<()> {
        session::save_session(&formloom_dir.join(SESSION_FILE), session)
            .context("failed to write session draft")
    }
}
