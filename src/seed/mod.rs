//! Seed data providers
//!
//! The desk starts from a [`Seed`]: the built-in fixtures, or a JSON file of
//! the same shape (`{"rules": [...], "applications": [...]}`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RuledeskError};
use crate::fs::read_json;
use crate::schemas::{Application, Rule};

const FIXTURES: &str = include_str!("fixtures.json");

/// Initial contents of a desk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub rules: Vec<Rule>,

    #[serde(default)]
    pub applications: Vec<Application>,
}

/// Supplies the initial rules and applications
pub trait SeedProvider {
    fn load(&self) -> Result<Seed>;

    /// Where the data comes from, for logs
    fn describe(&self) -> String;
}

/// The fixtures compiled into the binary
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSeed;

impl SeedProvider for BuiltinSeed {
    fn load(&self) -> Result<Seed> {
        serde_json::from_str(FIXTURES)
            .map_err(|e| RuledeskError::wrap(e, "built-in fixtures are malformed"))
    }

    fn describe(&self) -> String {
        "built-in fixtures".to_string()
    }
}

/// A seed file on disk
#[derive(Debug, Clone)]
pub struct JsonSeedFile {
    path: PathBuf,
}

impl JsonSeedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonSeedFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeedProvider for JsonSeedFile {
    fn load(&self) -> Result<Seed> {
        read_json(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pick the provider for an optional seed path
pub fn provider_for(path: Option<PathBuf>) -> Box<dyn SeedProvider> {
    match path {
        Some(path) => Box::new(JsonSeedFile::new(path)),
        None => Box::new(BuiltinSeed),
    }
}
