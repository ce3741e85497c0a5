//! Draft schema - The editable form payload behind a submission

use serde::{Deserialize, Serialize};

use super::{ApplicationStatus, ApplicationType, Calculation, OnlineSourcing, TractionGoal};

/// Whether the form proposes a new rule or iterates an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmitMode {
    #[default]
    Create,
    Iterate,
}

impl std::fmt::Display for SubmitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitMode::Create => write!(f, "create"),
            SubmitMode::Iterate => write!(f, "iterate"),
        }
    }
}

/// The status a submission asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DesiredStatus {
    /// Save without validation; never sent for approval
    Draft,
    /// Submit for approval
    #[default]
    Pending,
}

impl DesiredStatus {
    pub fn status(self) -> ApplicationStatus {
        match self {
            DesiredStatus::Draft => ApplicationStatus::Draft,
            DesiredStatus::Pending => ApplicationStatus::Pending,
        }
    }
}

/// User-editable fields of an application form.
///
/// Text fields use the empty string for "not filled in", exactly as the form
/// collects them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDraft {
    /// Rule being iterated (iterate mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub application_type: Option<ApplicationType>,

    pub level: String,
    pub reward_penalty_level: String,
    pub dimension: String,
    pub item1: String,
    pub item2: String,
    pub logic: String,

    /// Description of the change (iterate mode)
    pub iterate_content: String,

    pub reward_std: String,
    pub penalty_std: String,
    pub target: String,
    pub org: String,
    pub owner: String,
    pub reason: String,

    /// Explicit version; derived when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Collected by the form but ignored; online capability is derived from
    /// `appliedPosition`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,

    #[serde(flatten)]
    pub traction: TractionGoal,

    #[serde(flatten)]
    pub calculation: Calculation,

    #[serde(flatten)]
    pub online: OnlineSourcing,
}

/// A complete submission command
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub draft: ApplicationDraft,
    pub mode: SubmitMode,
    /// Set when re-editing a Draft or Rejected application
    pub existing_id: Option<String>,
    pub desired: DesiredStatus,
}

impl SubmitRequest {
    /// A fresh submission for approval
    pub fn submit(draft: ApplicationDraft, mode: SubmitMode) -> Self {
        SubmitRequest {
            draft,
            mode,
            existing_id: None,
            desired: DesiredStatus::Pending,
        }
    }

    /// A fresh draft save
    pub fn draft(draft: ApplicationDraft, mode: SubmitMode) -> Self {
        SubmitRequest {
            draft,
            mode,
            existing_id: None,
            desired: DesiredStatus::Draft,
        }
    }

    /// Target an existing application instead of creating one
    pub fn editing(mut self, existing_id: impl Into<String>) -> Self {
        self.existing_id = Some(existing_id.into());
        self
    }
}
