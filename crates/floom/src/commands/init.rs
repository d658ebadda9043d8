//! `floom init` -- create a .formloom directory with default config.

use anyhow::{Context, Result};

use formloom_config::config::{self, FormloomConfig};
use formloom_config::dir;

use crate::cli::InitArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `floom init` command.
pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    let base = match &args.path {
        Some(p) => std::path::PathBuf::from(p),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let formloom_dir = dir::ensure_formloom_dir(&base)
        .with_context(|| format!("failed to create .formloom under {}", base.display()))?;

    // Write the default config only if none exists yet; re-running init
    // must not clobber a tuned configuration.
    let config_path = formloom_dir.join(config::CONFIG_FILE);
    if !config_path.exists() {
        config::save_config(&formloom_dir, &FormloomConfig::default())
            .context("failed to write default config")?;
    }

    if ctx.json {
        output_json(&serde_json::json!({ "dir": formloom_dir.display().to_string() }));
    } else if !ctx.quiet {
        println!("Initialized formloom directory: {}", formloom_dir.display());
    }
    Ok(())
}
