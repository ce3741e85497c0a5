//! User intents as data
//!
//! One JSON object per line, tagged by `intent`:
//!
//! ```json
//! {"intent": "submit", "draft": {"item1": "投诉", "item2": "虚假签收", "level": "收派环节", "rewardPenaltyLevel": "收派岗"}}
//! {"intent": "updateDevStatus", "id": "102", "status": "Done", "owner": "LiSi"}
//! {"intent": "release", "id": "103"}
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RuledeskError};
use crate::schemas::{ApplicationDraft, ApplicationStatus, DesiredStatus, DevStatus, SubmitMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "camelCase")]
pub enum Intent {
    /// Submit for approval, optionally re-editing `existing`
    Submit {
        draft: ApplicationDraft,
        #[serde(default)]
        mode: SubmitMode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        existing: Option<String>,
    },
    /// Save without validation
    SaveDraft {
        draft: ApplicationDraft,
        #[serde(default)]
        mode: SubmitMode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        existing: Option<String>,
    },
    /// Propose a change to a live rule
    Iterate {
        rule: String,
        content: String,
        #[serde(default)]
        reason: String,
        #[serde(default)]
        desired: DesiredStatus,
    },
    UpdateDevStatus {
        id: String,
        status: DevStatus,
        owner: String,
    },
    Release {
        id: String,
    },
    Offline {
        id: String,
    },
    Permissions {
        id: String,
        creator: String,
        owner: String,
    },
    Approve {
        id: String,
    },
    Reject {
        id: String,
    },
    /// Wait for every outstanding approval
    Settle,
}

impl Intent {
    /// Parse one line of a session script
    pub fn parse(line: &str) -> Result<Self> {
        serde_json::from_str(line).map_err(|e| RuledeskError::InvalidJson(e.to_string()))
    }
}

/// What applying an intent did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum IntentOutcome {
    /// An application was stored
    Submitted { id: String, status: ApplicationStatus },
    /// A record changed
    Updated { id: String },
    /// An application became a live rule
    Released {
        application: String,
        rule: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        retired: Option<String>,
    },
    /// No record with this id; nothing changed
    Ignored { id: String },
    /// Approvals applied while settling
    Settled { approved: usize },
}

impl std::fmt::Display for IntentOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntentOutcome::Submitted { id, status } => write!(f, "submitted {} ({})", id, status),
            IntentOutcome::Updated { id } => write!(f, "updated {}", id),
            IntentOutcome::Released {
                application,
                rule,
                retired: Some(old),
            } => write!(f, "released {} as rule {} (retired {})", application, rule, old),
            IntentOutcome::Released {
                application, rule, ..
            } => write!(f, "released {} as rule {}", application, rule),
            IntentOutcome::Ignored { id } => write!(f, "ignored {}: no such record", id),
            IntentOutcome::Settled { approved } => write!(f, "settled, {} approved", approved),
        }
    }
}
