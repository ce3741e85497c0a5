//! File system utilities for ruledesk
//!
//! Provides path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{read_config, read_json, write_config, write_json};
pub use paths::{
    find_workspace_root, get_config_path, get_ruledesk_dir, get_seed_path, resolve_cwd,
    RULEDESK_DIR,
};
