//! Path resolution utilities for ruledesk
//!
//! Provides functions to locate the workspace root and construct paths
//! to the files under `.ruledesk`.

use std::path::{Path, PathBuf};

use crate::errors::{Result, RuledeskError};

/// Name of the directory that marks a ruledesk workspace
pub const RULEDESK_DIR: &str = ".ruledesk";

/// Find the nearest ancestor containing a `.ruledesk` directory.
///
/// Walks up the directory tree from the starting directory. A missing
/// workspace is not an error; callers fall back to defaults.
///
/// # Errors
/// * `ConfigError` - If the starting directory cannot be resolved
pub fn find_workspace_root(start_cwd: &Path) -> Result<Option<PathBuf>> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| RuledeskError::ConfigError(format!("Cannot resolve path: {}", e)))?;

    loop {
        if get_ruledesk_dir(&current).is_dir() {
            return Ok(Some(current));
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return Ok(None),
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .ruledesk directory.
pub fn get_ruledesk_dir(root: &Path) -> PathBuf {
    root.join(RULEDESK_DIR)
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_ruledesk_dir(root).join("config.json")
}

/// Resolve a configured seed path; relative paths are taken from the workspace root.
pub fn get_seed_path(root: &Path, seed_path: &Path) -> PathBuf {
    if seed_path.is_absolute() {
        seed_path.to_path_buf()
    } else {
        root.join(seed_path)
    }
}
