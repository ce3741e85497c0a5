//! Config schema - Configuration for ruledesk

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How Pending applications get decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalMode {
    /// Approve automatically after `approval_delay_ms`
    #[default]
    Delayed,
    /// Approve as soon as the submission lands
    Immediate,
    /// Wait for an explicit approve/reject
    Manual,
}

impl std::fmt::Display for ApprovalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalMode::Delayed => write!(f, "delayed"),
            ApprovalMode::Immediate => write!(f, "immediate"),
            ApprovalMode::Manual => write!(f, "manual"),
        }
    }
}

impl std::str::FromStr for ApprovalMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delayed" => Ok(ApprovalMode::Delayed),
            "immediate" => Ok(ApprovalMode::Immediate),
            "manual" => Ok(ApprovalMode::Manual),
            _ => Err(format!("Unknown approval mode: {}", s)),
        }
    }
}

/// Fallbacks applied to unset fields when a rule is synthesized at release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDefaults {
    #[serde(default = "default_reward_penalty_level")]
    pub reward_penalty_level: String,

    /// Used for both the reward and the penalty standard
    #[serde(default = "default_standard")]
    pub standard: String,

    #[serde(default = "default_target")]
    pub target: String,

    #[serde(default = "default_org")]
    pub org: String,
}

fn default_reward_penalty_level() -> String {
    "未定义".to_string()
}

fn default_standard() -> String {
    "参考详情".to_string()
}

fn default_target() -> String {
    "全网".to_string()
}

fn default_org() -> String {
    "运营部".to_string()
}

impl Default for ReleaseDefaults {
    fn default() -> Self {
        ReleaseDefaults {
            reward_penalty_level: default_reward_penalty_level(),
            standard: default_standard(),
            target: default_target(),
            org: default_org(),
        }
    }
}

/// Main configuration for ruledesk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Name recorded as creator on submissions
    #[serde(default = "default_current_user")]
    pub current_user: String,

    #[serde(default)]
    pub approval_mode: ApprovalMode,

    /// Delay before a Delayed approval lands
    #[serde(default = "default_approval_delay_ms")]
    pub approval_delay_ms: u64,

    /// Refuse to release applications that are not Ready to Release
    #[serde(default = "default_strict_release")]
    pub strict_release: bool,

    #[serde(default)]
    pub release_defaults: ReleaseDefaults,

    /// Seed file; relative paths resolve against the workspace root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_path: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_current_user() -> String {
    "当前用户".to_string()
}

fn default_approval_delay_ms() -> u64 {
    2000
}

fn default_strict_release() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            current_user: default_current_user(),
            approval_mode: ApprovalMode::Delayed,
            approval_delay_ms: 2000,
            strict_release: true,
            release_defaults: ReleaseDefaults::default(),
            seed_path: None,
        }
    }
}
