//! Discovery and management of the `.formloom/` directory.
//!
//! The `.formloom/` directory holds a project's config, the saved-forms
//! document, and the working-draft file. This module finds it by walking up
//! the directory tree and creates it when initializing.

use std::path::{Path, PathBuf};

use crate::config::ConfigError;

/// The name of the formloom metadata directory.
pub const FORMLOOM_DIR_NAME: &str = ".formloom";

/// Environment variable that overrides directory discovery.
pub const FORMLOOM_DIR_ENV: &str = "FORMLOOM_DIR";

/// Walks up the directory tree from `start` looking for a `.formloom/`
/// directory. The `FORMLOOM_DIR` environment variable wins when it points
/// at an existing directory.
///
/// Returns `None` when the filesystem root is reached without a match.
pub fn find_formloom_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(FORMLOOM_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    let start = start.canonicalize().ok()?;
    let mut current = start.as_path();
    loop {
        let candidate = current.join(FORMLOOM_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }
        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => break,
        }
    }

    None
}

/// Like [`find_formloom_dir`], turning `None` into
/// [`ConfigError::DirNotFound`].
pub fn find_formloom_dir_or_error(start: &Path) -> Result<PathBuf, ConfigError> {
    find_formloom_dir(start).ok_or(ConfigError::DirNotFound)
}

/// Ensures a `.formloom/` directory exists under `path` (or at `path`
/// itself when it is already named `.formloom`), creating it as needed.
/// Returns the directory path.
pub fn ensure_formloom_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let dir = if path.ends_with(FORMLOOM_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(FORMLOOM_DIR_NAME)
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_creates_nested_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ensure_formloom_dir(tmp.path()).unwrap();
        assert!(dir.ends_with(FORMLOOM_DIR_NAME));
        assert!(dir.is_dir());

        // Idempotent, and accepts the directory itself.
        let again = ensure_formloom_dir(&dir).unwrap();
        assert_eq!(again, dir);
    }

    #[test]
    fn find_walks_up() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ensure_formloom_dir(tmp.path()).unwrap();
        let nested = tmp.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_formloom_dir(&nested).unwrap();
        assert_eq!(found.canonicalize().unwrap(), dir.canonicalize().unwrap());
    }

    #[test]
    fn find_missing_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        // No .formloom anywhere between tmp and / (tempdirs live in /tmp).
        assert!(find_formloom_dir(tmp.path()).is_none());
    }
}
