//! Application schema - A proposal to create or change a rule

use serde::{Deserialize, Serialize};

/// Overall lifecycle status of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Draft,
    /// Waiting on the approval authority
    Pending,
    /// Approved, development not started
    Approved,
    Rejected,
    #[serde(rename = "In Dev")]
    InDev,
    #[serde(rename = "Ready to Release")]
    ReadyToRelease,
    /// Terminal: the proposal became a live rule
    Released,
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationStatus::Draft => write!(f, "Draft"),
            ApplicationStatus::Pending => write!(f, "Pending"),
            ApplicationStatus::Approved => write!(f, "Approved"),
            ApplicationStatus::Rejected => write!(f, "Rejected"),
            ApplicationStatus::InDev => write!(f, "In Dev"),
            ApplicationStatus::ReadyToRelease => write!(f, "Ready to Release"),
            ApplicationStatus::Released => write!(f, "Released"),
        }
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" | "draft" => Ok(ApplicationStatus::Draft),
            "Pending" | "pending" => Ok(ApplicationStatus::Pending),
            "Approved" | "approved" => Ok(ApplicationStatus::Approved),
            "Rejected" | "rejected" => Ok(ApplicationStatus::Rejected),
            "In Dev" | "in_dev" => Ok(ApplicationStatus::InDev),
            "Ready to Release" | "ready_to_release" => Ok(ApplicationStatus::ReadyToRelease),
            "Released" | "released" => Ok(ApplicationStatus::Released),
            _ => Err(format!("Unknown application status: {}", s)),
        }
    }
}

/// What an application proposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ApplicationType {
    #[default]
    New,
    Iterate,
    /// Accepted in data; no transition consumes it
    Delete,
}

impl std::fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationType::New => write!(f, "New"),
            ApplicationType::Iterate => write!(f, "Iterate"),
            ApplicationType::Delete => write!(f, "Delete"),
        }
    }
}

impl std::str::FromStr for ApplicationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" | "new" => Ok(ApplicationType::New),
            "Iterate" | "iterate" => Ok(ApplicationType::Iterate),
            "Delete" | "delete" => Ok(ApplicationType::Delete),
            _ => Err(format!("Unknown application type: {}", s)),
        }
    }
}

/// Engineering sub-status of an approved application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DevStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Testing,
    Done,
}

impl DevStatus {
    /// The application status implied by this dev status.
    ///
    /// `Done` means the work can ship; everything else is still in development.
    pub fn implied_status(self) -> ApplicationStatus {
        match self {
            DevStatus::Done => ApplicationStatus::ReadyToRelease,
            DevStatus::Pending | DevStatus::InProgress | DevStatus::Testing => {
                ApplicationStatus::InDev
            }
        }
    }
}

impl std::fmt::Display for DevStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DevStatus::Pending => write!(f, "Pending"),
            DevStatus::InProgress => write!(f, "In Progress"),
            DevStatus::Testing => write!(f, "Testing"),
            DevStatus::Done => write!(f, "Done"),
        }
    }
}

impl std::str::FromStr for DevStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" | "pending" => Ok(DevStatus::Pending),
            "In Progress" | "in_progress" => Ok(DevStatus::InProgress),
            "Testing" | "testing" => Ok(DevStatus::Testing),
            "Done" | "done" => Ok(DevStatus::Done),
            _ => Err(format!("Unknown dev status: {}", s)),
        }
    }
}

/// Traction goal attached to a proposal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TractionGoal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traction_metric: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traction_current: Option<String>,

    /// Monthly targets, January through December
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traction_targets: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traction_logic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traction_table: Option<String>,
}

/// Supporting calculation figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calc_avg_reward: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calc_avg_penalty: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calc_limit_reward: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calc_limit_penalty: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calc_formula: Option<String>,

    /// Reference to an uploaded supporting file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calc_file: Option<String>,
}

/// Online-sourcing fields; their presence marks a rule as automatable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineSourcing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_position: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_product: Option<String>,
}

/// A proposal to create or iterate a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,

    /// Back-reference to the iterated rule (iterations only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    pub level: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_penalty_level: Option<String>,

    pub dimension: String,

    pub item1: String,

    pub item2: String,

    #[serde(rename = "type")]
    pub application_type: ApplicationType,

    /// Rule logic for new rules, change description for iterations
    pub desc: String,

    /// Full rule logic, kept apart from `desc` for iterations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<String>,

    pub reason: String,

    pub creator: String,

    pub create_time: String,

    pub version: u32,

    pub status: ApplicationStatus,

    // Proposed rule content, copied onto the rule at release

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_std: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty_std: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_owner: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_status: Option<DevStatus>,

    #[serde(flatten)]
    pub traction: TractionGoal,

    #[serde(flatten)]
    pub calculation: Calculation,

    #[serde(flatten)]
    pub online: OnlineSourcing,
}

impl Application {
    /// Whether the rule can be sourced automatically.
    ///
    /// Derived from the presence of `appliedPosition`, not from any flag
    /// collected on the form.
    pub fn is_online_capable(&self) -> bool {
        self.online
            .applied_position
            .as_deref()
            .is_some_and(|p| !p.is_empty())
    }

    /// Dev status as shown on the tracking board; unset counts as Pending
    pub fn effective_dev_status(&self) -> DevStatus {
        self.dev_status.unwrap_or_default()
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    /// Return a new Application with the given status
    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }

    /// Return a new Application with its dev assignment replaced.
    ///
    /// `status` is always recomputed from `dev_status`; there is no way to set
    /// the two independently.
    pub fn with_dev_status(mut self, dev_status: DevStatus, dev_owner: impl Into<String>) -> Self {
        self.dev_status = Some(dev_status);
        self.dev_owner = Some(dev_owner.into());
        self.status = dev_status.implied_status();
        self
    }

    /// Return a new Application marked approved, with development queued
    pub fn with_approval(mut self) -> Self {
        self.status = ApplicationStatus::Approved;
        self.dev_status = Some(DevStatus::Pending);
        self
    }
}

#[cfg(test)]
pub(crate) fn sample_application(id: &str, status: ApplicationStatus) -> Application {
    Application {
        id: id.to_string(),
        rule_id: None,
        level: "运输环节".to_string(),
        reward_penalty_level: Some("司机岗".to_string()),
        dimension: "成本".to_string(),
        item1: "油耗管理".to_string(),
        item2: "油耗超标".to_string(),
        application_type: ApplicationType::New,
        desc: "新增百公里油耗考核标准".to_string(),
        logic: None,
        reason: "降低运输成本".to_string(),
        creator: "张三(012345)".to_string(),
        create_time: "2025-03-10".to_string(),
        version: 1,
        status,
        reward_std: None,
        penalty_std: None,
        target: None,
        org: None,
        owner: None,
        dev_owner: None,
        dev_status: None,
        traction: TractionGoal::default(),
        calculation: Calculation::default(),
        online: OnlineSourcing::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_status_uses_display_labels_on_the_wire() {
        assert_eq!(serde_json::to_string(&ApplicationStatus::InDev).unwrap(), "\"In Dev\"");
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::ReadyToRelease).unwrap(),
            "\"Ready to Release\""
        );
        assert_eq!(
            serde_json::from_str::<ApplicationStatus>("\"Ready to Release\"").unwrap(),
            ApplicationStatus::ReadyToRelease
        );
        assert_eq!(serde_json::to_string(&DevStatus::InProgress).unwrap(), "\"In Progress\"");
    }

    #[test]
    fn test_display_matches_serialized_form() {
        for status in [
            ApplicationStatus::Draft,
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::InDev,
            ApplicationStatus::ReadyToRelease,
            ApplicationStatus::Released,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
            assert_eq!(status.to_string().parse::<ApplicationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_implied_status() {
        assert_eq!(DevStatus::Done.implied_status(), ApplicationStatus::ReadyToRelease);
        assert_eq!(DevStatus::Pending.implied_status(), ApplicationStatus::InDev);
        assert_eq!(DevStatus::InProgress.implied_status(), ApplicationStatus::InDev);
        assert_eq!(DevStatus::Testing.implied_status(), ApplicationStatus::InDev);
    }

    #[test]
    fn test_seed_shaped_json_parses() {
        let json = r#"{
            "id": "103", "level": "中转环节", "rewardPenaltyLevel": "仓管岗", "dimension": "安全",
            "item1": "消防安全", "item2": "通道占用", "type": "Iterate",
            "desc": "调整处罚金额", "reason": "加强安全红线意识。",
            "creator": "王五(66666)", "createTime": "2025年2月20日", "version": 2,
            "status": "Ready to Release", "devStatus": "Done", "devOwner": "LiSi",
            "appliedPosition": "仓管员"
        }"#;
        let app: Application = serde_json::from_str(json).unwrap();
        assert_eq!(app.application_type, ApplicationType::Iterate);
        assert_eq!(app.status, ApplicationStatus::ReadyToRelease);
        assert_eq!(app.dev_status, Some(DevStatus::Done));
        assert_eq!(app.online.applied_position.as_deref(), Some("仓管员"));
        assert!(app.is_online_capable());
        assert!(app.rule_id.is_none());
    }

    #[test]
    fn test_flattened_groups_serialize_at_top_level() {
        let mut app = sample_application("1", ApplicationStatus::Draft);
        app.traction.traction_metric = Some("投诉率".to_string());
        app.calculation.calc_formula = Some("a*b".to_string());

        let value = serde_json::to_value(&app).unwrap();
        assert_eq!(value["tractionMetric"], "投诉率");
        assert_eq!(value["calcFormula"], "a*b");
        assert_eq!(value["type"], "New");
        assert!(value.get("appliedPosition").is_none());
    }

    #[test]
    fn test_online_capability_is_derived_from_position() {
        let mut app = sample_application("1", ApplicationStatus::Approved);
        assert!(!app.is_online_capable());

        app.online.applied_position = Some(String::new());
        assert!(!app.is_online_capable());

        app.online.applied_position = Some("收派员".to_string());
        assert!(app.is_online_capable());
    }

    #[test]
    fn test_with_dev_status_recomputes_status() {
        let app = sample_application("1", ApplicationStatus::Released);

        let done = app.clone().with_dev_status(DevStatus::Done, "LiSi");
        assert_eq!(done.status, ApplicationStatus::ReadyToRelease);
        assert_eq!(done.dev_owner.as_deref(), Some("LiSi"));

        let testing = done.with_dev_status(DevStatus::Testing, "WangWu");
        assert_eq!(testing.status, ApplicationStatus::InDev);
        assert_eq!(testing.dev_status, Some(DevStatus::Testing));
        assert_eq!(app.status, ApplicationStatus::Released); // Original unchanged
    }

    #[test]
    fn test_with_approval() {
        let app = sample_application("1", ApplicationStatus::Pending).with_approval();
        assert_eq!(app.status, ApplicationStatus::Approved);
        assert_eq!(app.dev_status, Some(DevStatus::Pending));
        assert_eq!(app.effective_dev_status(), DevStatus::Pending);
    }
}
