//! Validation rules for submissions and transitions

use crate::schemas::{Application, ApplicationDraft, ApplicationStatus, DesiredStatus, SubmitMode};

use super::states::{get_allowed_next_statuses, is_editable_status};

/// Message shown when required form fields are missing
pub const MISSING_REQUIRED_FIELDS: &str = "请填写必填项";

/// Message shown when an iteration has no change description
pub const MISSING_ITERATION_CONTENT: &str = "请填写迭代内容说明";

/// Result of a validation check
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// Reason for failure (if valid is false)
    pub reason: Option<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        ValidationResult {
            valid: true,
            reason: None,
        }
    }

    /// Create a failed validation result
    pub fn failure(reason: impl Into<String>) -> Self {
        ValidationResult {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Names of the required fields that are blank
pub fn missing_required_fields(draft: &ApplicationDraft) -> Vec<&'static str> {
    [
        ("item1", draft.item1.as_str()),
        ("item2", draft.item2.as_str()),
        ("level", draft.level.as_str()),
        ("rewardPenaltyLevel", draft.reward_penalty_level.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| is_blank(value))
    .map(|(name, _)| name)
    .collect()
}

/// Validate the required fields of a submission
pub fn validate_required_fields(draft: &ApplicationDraft) -> ValidationResult {
    let missing = missing_required_fields(draft);
    if !missing.is_empty() {
        return ValidationResult::failure(format!(
            "{}: {}",
            MISSING_REQUIRED_FIELDS,
            missing.join(", ")
        ));
    }
    ValidationResult::success()
}

/// Validate that an iteration explains what changes
pub fn validate_iteration_content(draft: &ApplicationDraft, mode: SubmitMode) -> ValidationResult {
    if mode == SubmitMode::Iterate && is_blank(&draft.iterate_content) {
        return ValidationResult::failure(MISSING_ITERATION_CONTENT);
    }
    ValidationResult::success()
}

/// Validate a submission.
///
/// Draft saves are never validated. Pending submissions need every required
/// field, and iterations additionally need their change description.
pub fn validate_submission(
    draft: &ApplicationDraft,
    mode: SubmitMode,
    desired: DesiredStatus,
) -> ValidationResult {
    if desired == DesiredStatus::Draft {
        return ValidationResult::success();
    }

    let required = validate_required_fields(draft);
    if !required.valid {
        return required;
    }

    validate_iteration_content(draft, mode)
}

/// Validate that an existing application may be overwritten by a re-edit
pub fn can_edit(application: &Application) -> ValidationResult {
    if !is_editable_status(application.status) {
        return ValidationResult::failure(format!(
            "application {} is {} and can no longer be edited",
            application.id, application.status
        ));
    }
    ValidationResult::success()
}

/// Validate a named status transition
pub fn validate_transition(current: ApplicationStatus, target: ApplicationStatus) -> ValidationResult {
    if !get_allowed_next_statuses(current).contains(&target) {
        return ValidationResult::failure(format!(
            "cannot transition from {} to {}",
            current, target
        ));
    }
    ValidationResult::success()
}

/// Validate releasing an application.
///
/// Without `strict`, any application may be released.
pub fn can_release(application: &Application, strict: bool) -> ValidationResult {
    if !strict {
        return ValidationResult::success();
    }
    validate_transition(application.status, ApplicationStatus::Released)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::sample_application;

    fn complete_draft() -> ApplicationDraft {
        ApplicationDraft {
            level: "收派环节".to_string(),
            reward_penalty_level: "收派岗".to_string(),
            item1: "投诉".to_string(),
            item2: "虚假签收".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_draft_passes() {
        let result = validate_submission(&complete_draft(), SubmitMode::Create, DesiredStatus::Pending);
        assert!(result.valid);
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let draft = ApplicationDraft {
            item2: "   ".to_string(),
            reward_penalty_level: String::new(),
            ..complete_draft()
        };
        assert_eq!(missing_required_fields(&draft), vec!["item2", "rewardPenaltyLevel"]);

        let result = validate_submission(&draft, SubmitMode::Create, DesiredStatus::Pending);
        assert!(!result.valid);
        let reason = result.reason.unwrap();
        assert!(reason.starts_with(MISSING_REQUIRED_FIELDS));
        assert!(reason.contains("rewardPenaltyLevel"));
    }

    #[test]
    fn test_drafts_skip_validation() {
        let result = validate_submission(
            &ApplicationDraft::default(),
            SubmitMode::Iterate,
            DesiredStatus::Draft,
        );
        assert!(result.valid);
    }

    #[test]
    fn test_iteration_needs_content() {
        let result = validate_submission(&complete_draft(), SubmitMode::Iterate, DesiredStatus::Pending);
        assert!(!result.valid);
        assert_eq!(result.reason.as_deref(), Some(MISSING_ITERATION_CONTENT));

        let draft = ApplicationDraft {
            iterate_content: "上调处罚金额".to_string(),
            ..complete_draft()
        };
        assert!(validate_submission(&draft, SubmitMode::Iterate, DesiredStatus::Pending).valid);
    }

    #[test]
    fn test_required_fields_checked_before_iteration_content() {
        let result = validate_submission(
            &ApplicationDraft::default(),
            SubmitMode::Iterate,
            DesiredStatus::Pending,
        );
        assert!(result.reason.unwrap().starts_with(MISSING_REQUIRED_FIELDS));
    }

    #[test]
    fn test_can_edit() {
        assert!(can_edit(&sample_application("1", ApplicationStatus::Draft)).valid);
        assert!(can_edit(&sample_application("1", ApplicationStatus::Rejected)).valid);

        let result = can_edit(&sample_application("1", ApplicationStatus::InDev));
        assert!(!result.valid);
        assert!(result.reason.unwrap().contains("In Dev"));
    }

    #[test]
    fn test_validate_transition() {
        assert!(validate_transition(ApplicationStatus::Pending, ApplicationStatus::Approved).valid);
        assert!(!validate_transition(ApplicationStatus::Draft, ApplicationStatus::Approved).valid);
        assert!(!validate_transition(ApplicationStatus::Released, ApplicationStatus::InDev).valid);
    }

    #[test]
    fn test_can_release() {
        let ready = sample_application("1", ApplicationStatus::ReadyToRelease);
        let approved = sample_application("2", ApplicationStatus::Approved);

        assert!(can_release(&ready, true).valid);
        assert!(!can_release(&approved, true).valid);
        assert!(can_release(&approved, false).valid);
    }
}
