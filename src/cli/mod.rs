//! CLI module for ruledesk
//!
//! Provides the command-line interface using clap.

pub mod commands;
pub mod render;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::config::Workspace;
use crate::desk::Desk;
use crate::errors::{Result, RuledeskError};
use crate::fs::resolve_cwd;

/// Ruledesk - Governance desk for reward/penalty rules and their change applications
#[derive(Parser, Debug)]
#[command(name = "ruledesk")]
#[command(version)]
#[command(about = "Governance desk for reward/penalty rules and their change applications")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Seed file to start from instead of the configured one
    #[arg(long, global = true, env = "RULEDESK_SEED")]
    pub seed: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl Cli {
    /// The command context shared by every subcommand
    pub fn context(&self) -> Ctx {
        Ctx {
            cwd: resolve_cwd(self.cwd.as_deref()),
            seed: self.seed.clone(),
            json: self.json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a .ruledesk workspace with the default configuration
    Init {
        /// Overwrite an existing config.json
        #[arg(long)]
        force: bool,
    },

    /// List the rule catalog
    Rules(RuleArgs),

    /// List change applications
    Applications(ApplicationArgs),

    /// Show the development tracking board
    Dev(DevArgs),

    /// Show applications waiting for release
    Pending(PendingArgs),

    /// Count rules per reward/penalty level
    Stats,

    /// Show a rule or an application by id
    Show {
        /// Rule or application ID
        id: String,
    },

    /// Show every recorded version of a rule's lineage
    History {
        /// Rule ID
        id: String,
    },

    /// Check configuration and data consistency
    Doctor,

    /// Apply a stream of JSON intents, one per line
    Session {
        /// Path to file containing intents (reads from stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Write the resulting rules and applications to this seed file
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

/// Rule catalog filters
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Reward/penalty level (全部层级 for any)
    #[arg(long)]
    pub level: Option<String>,

    /// Dimension (全部维度 for any)
    #[arg(long)]
    pub dimension: Option<String>,

    /// Keyword on the second-tier item
    #[arg(long, default_value = "")]
    pub item: String,

    /// Keyword on the reward or penalty standard
    #[arg(long = "std", default_value = "")]
    pub standard: String,

    /// Keyword on the creator
    #[arg(long, default_value = "")]
    pub creator: String,
}

/// Application list filters
#[derive(Args, Debug, Clone, Default)]
pub struct ApplicationArgs {
    /// Reward/penalty level (全部层级 for any)
    #[arg(long)]
    pub level: Option<String>,

    /// Dimension (全部维度 for any)
    #[arg(long)]
    pub dimension: Option<String>,

    /// Keyword on the second-tier item
    #[arg(long, default_value = "")]
    pub item: String,

    /// Application type: 新增, 迭代 or an English name
    #[arg(long = "type")]
    pub application_type: Option<String>,

    /// Application status label or English name
    #[arg(long)]
    pub status: Option<String>,
}

/// Development board filters
#[derive(Args, Debug, Clone, Default)]
pub struct DevArgs {
    /// Reward/penalty level (全部层级 for any)
    #[arg(long)]
    pub level: Option<String>,

    /// Application type: 新增, 迭代 or an English name
    #[arg(long = "type")]
    pub application_type: Option<String>,

    /// Online capable: 是 or 否
    #[arg(long)]
    pub online: Option<String>,

    /// Dev status label or English name
    #[arg(long)]
    pub dev_status: Option<String>,

    /// Keyword on the dev owner
    #[arg(long, default_value = "")]
    pub owner: String,

    /// Keyword on the item or the description
    #[arg(long, default_value = "")]
    pub keyword: String,
}

/// Release queue filters
#[derive(Args, Debug, Clone, Default)]
pub struct PendingArgs {
    /// Reward/penalty level (全部层级 for any)
    #[arg(long)]
    pub level: Option<String>,

    /// Application type: 新增, 迭代 or an English name
    #[arg(long = "type")]
    pub application_type: Option<String>,

    /// Keyword on the item, the description or the id
    #[arg(long, default_value = "")]
    pub keyword: String,

    /// Keyword on the creator
    #[arg(long, default_value = "")]
    pub creator: String,
}

/// What every command needs to find its data and shape its output
#[derive(Debug, Clone)]
pub struct Ctx {
    pub cwd: PathBuf,
    pub seed: Option<PathBuf>,
    pub json: bool,
}

impl Ctx {
    pub fn workspace(&self) -> Result<Workspace> {
        Workspace::discover(&self.cwd)
    }

    /// Load the workspace config and seed, and open a desk over them
    pub fn open_desk(&self) -> Result<Desk> {
        let workspace = self.workspace()?;
        let provider = workspace.seed_provider(self.seed.as_deref());
        info!("Loading seed from {}", provider.describe());
        let seed = provider.load()?;
        Ok(Desk::new(workspace.config, seed))
    }

    /// Print `value` as pretty JSON on stdout
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| RuledeskError::InvalidJson(e.to_string()))?;
        println!("{}", json);
        Ok(())
    }

    pub fn seed_override(&self) -> Option<&Path> {
        self.seed.as_deref()
    }
}
