//! Workspace configuration

mod loader;

pub use loader::{load_config, Workspace, SUPPORTED_SCHEMA_VERSION};
