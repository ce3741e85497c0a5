//! Configuration loading with defaults

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{Result, RuledeskError};
use crate::fs;
use crate::schemas::Config;
use crate::seed::{provider_for, SeedProvider};

/// Highest config schema version this build understands
pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;

/// Load configuration from a workspace, falling back to defaults.
///
/// If config.json exists, it will be read and merged with defaults.
/// If it doesn't exist, default configuration is returned.
///
/// # Errors
/// * `InvalidJson` - The file does not parse
/// * `ConfigError` - The file declares a schema version this build does not know
pub fn load_config(root: &Path) -> Result<Config> {
    let config = fs::read_config(root)?;
    if config.schema_version == 0 || config.schema_version > SUPPORTED_SCHEMA_VERSION {
        return Err(RuledeskError::ConfigError(format!(
            "Unsupported schema_version {} (expected {})",
            config.schema_version, SUPPORTED_SCHEMA_VERSION
        )));
    }
    Ok(config)
}

/// Where the desk runs: an optional workspace root and its configuration
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Nearest directory with a `.ruledesk` folder, if any
    pub root: Option<PathBuf>,
    pub config: Config,
}

impl Workspace {
    /// Find the workspace above `cwd` and load its config.
    ///
    /// Outside a workspace the defaults apply.
    pub fn discover(cwd: &Path) -> Result<Self> {
        let Some(root) = fs::find_workspace_root(cwd)? else {
            debug!("No {} directory above {}, using defaults", fs::RULEDESK_DIR, cwd.display());
            return Ok(Workspace {
                root: None,
                config: Config::default(),
            });
        };

        let config = load_config(&root)?;
        debug!("Loaded config from {}", fs::get_config_path(&root).display());
        Ok(Workspace {
            root: Some(root),
            config,
        })
    }

    /// Seed provider for this workspace; `override_path` wins over the config.
    pub fn seed_provider(&self, override_path: Option<&Path>) -> Box<dyn SeedProvider> {
        let path = match (override_path, &self.config.seed_path) {
            (Some(path), _) => Some(path.to_path_buf()),
            (None, Some(configured)) => Some(match &self.root {
                Some(root) => fs::get_seed_path(root, configured),
                None => configured.clone(),
            }),
            (None, None) => None,
        };
        provider_for(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::ApprovalMode;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn setup_workspace(config: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".ruledesk");
        std_fs::create_dir(&dir).unwrap();
        if let Some(content) = config {
            std_fs::write(dir.join("config.json"), content).unwrap();
        }
        temp
    }

    #[test]
    fn test_load_config_defaults() {
        let temp = setup_workspace(None);

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.approval_mode, ApprovalMode::Delayed);
        assert_eq!(config.approval_delay_ms, 2000);
        assert!(config.strict_release);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = setup_workspace(Some(
            r#"{
                "current_user": "赵敏",
                "approval_mode": "immediate",
                "strict_release": false
            }"#,
        ));

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.current_user, "赵敏");
        assert_eq!(config.approval_mode, ApprovalMode::Immediate);
        assert!(!config.strict_release);
        // Default for unspecified field
        assert_eq!(config.approval_delay_ms, 2000);
    }

    #[test]
    fn test_load_config_rejects_future_schema() {
        let temp = setup_workspace(Some(r#"{"schema_version": 2}"#));
        let err = load_config(temp.path()).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_discover_from_subdir() {
        let temp = setup_workspace(Some(r#"{"approval_mode": "manual"}"#));
        let subdir = temp.path().join("nested");
        std_fs::create_dir(&subdir).unwrap();

        let workspace = Workspace::discover(&subdir).unwrap();
        assert_eq!(workspace.root, Some(temp.path().canonicalize().unwrap()));
        assert_eq!(workspace.config.approval_mode, ApprovalMode::Manual);
    }

    #[test]
    fn test_seed_provider_resolution() {
        let temp = setup_workspace(Some(r#"{"seed_path": "data/seed.json"}"#));
        let workspace = Workspace::discover(temp.path()).unwrap();
        let root = temp.path().canonicalize().unwrap();

        let configured = workspace.seed_provider(None).describe();
        assert_eq!(configured, root.join("data/seed.json").display().to_string());

        let overridden = workspace.seed_provider(Some(Path::new("other.json"))).describe();
        assert_eq!(overridden, "other.json");
    }

    #[test]
    fn test_seed_provider_defaults_to_builtin() {
        let workspace = Workspace {
            root: None,
            config: Config::default(),
        };
        assert_eq!(workspace.seed_provider(None).describe(), "built-in fixtures");
    }
}
