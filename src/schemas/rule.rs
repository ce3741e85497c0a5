//! Rule schema - A governing reward/penalty policy record

use serde::{Deserialize, Serialize};

/// Lifecycle status of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleStatus {
    /// Currently governing
    Active,
    /// Offlined or superseded by a newer iteration
    Inactive,
    /// Retired by policy; kept for reference only
    Deprecated,
}

impl std::fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleStatus::Active => write!(f, "Active"),
            RuleStatus::Inactive => write!(f, "Inactive"),
            RuleStatus::Deprecated => write!(f, "Deprecated"),
        }
    }
}

impl std::str::FromStr for RuleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" | "active" => Ok(RuleStatus::Active),
            "Inactive" | "inactive" => Ok(RuleStatus::Inactive),
            "Deprecated" | "deprecated" => Ok(RuleStatus::Deprecated),
            _ => Err(format!("Unknown rule status: {}", s)),
        }
    }
}

/// A reward/penalty rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,

    /// Process stage (环节), e.g. 收派环节
    pub level: String,

    /// Role/level tag (奖罚层级), e.g. 收派岗
    pub reward_penalty_level: String,

    pub dimension: String,

    /// First-tier event taxonomy
    pub item1: String,

    /// Second-tier event taxonomy
    pub item2: String,

    /// Rationale / trigger logic
    pub logic: String,

    pub reward_std: String,

    pub penalty_std: String,

    /// Target audience
    pub target: String,

    /// Owning organization
    pub org: String,

    /// Interface owner
    pub owner: String,

    /// Author
    pub creator: String,

    pub first_apply_date: String,

    #[serde(default)]
    pub update_date: String,

    pub version: u32,

    pub status: RuleStatus,

    /// Identity shared by every iteration of this rule. `None` means the rule
    /// starts its own lineage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineage_id: Option<String>,
}

impl Rule {
    /// The lineage this rule belongs to
    pub fn lineage(&self) -> &str {
        self.lineage_id.as_deref().unwrap_or(&self.id)
    }

    pub fn is_active(&self) -> bool {
        self.status == RuleStatus::Active
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    /// Return a new Rule with the given status
    pub fn with_status(mut self, status: RuleStatus) -> Self {
        self.status = status;
        self
    }

    /// Return a new Rule with creator and owner replaced
    pub fn with_permissions(mut self, creator: impl Into<String>, owner: impl Into<String>) -> Self {
        self.creator = creator.into();
        self.owner = owner.into();
        self
    }

    /// Return a new Rule pinned to the given lineage
    pub fn with_lineage(mut self, lineage_id: impl Into<String>) -> Self {
        self.lineage_id = Some(lineage_id.into());
        self
    }
}

#[cfg(test)]
pub(crate) fn sample_rule(id: &str) -> Rule {
    Rule {
        id: id.to_string(),
        level: "收派环节".to_string(),
        reward_penalty_level: "收派岗".to_string(),
        dimension: "服务".to_string(),
        item1: "客户投诉".to_string(),
        item2: "态度恶劣".to_string(),
        logic: "客户投诉收派员态度问题，经核实为有效投诉。".to_string(),
        reward_std: "无".to_string(),
        penalty_std: "每次扣罚200元".to_string(),
        target: "收派员".to_string(),
        org: "服务质量处".to_string(),
        owner: "张伟".to_string(),
        creator: "李娜".to_string(),
        first_apply_date: "2024年6月".to_string(),
        update_date: String::new(),
        version: 1,
        status: RuleStatus::Active,
        lineage_id: None,
    }
}
