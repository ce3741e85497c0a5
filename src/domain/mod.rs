//! Domain logic for the application lifecycle and its effect on the rule catalog

mod diagnostics;
mod lineage;
mod states;
mod transitions;
mod validation;


pub use diagnostics::{diagnose, Diagnostic};
pub use lineage::{active_siblings, duplicate_active_lineages, DuplicateActive, LineageKey};
pub use states::{
    derive_status, get_allowed_next_statuses, get_status_index, is_editable_status,
    is_on_dev_board, is_terminal_status, APPLICATION_PIPELINE, DEV_BOARD_STATUSES,
};
pub use transitions::{
    approve_application, build_application, draft_from_application, draft_from_rule,
    manage_permissions, offline_rule, reject_application, release_application,
    release_precondition, submit_application, synthesize_rule, update_dev_status, Keyed,
    ReleaseContext, ReleaseOutput, SubmissionContext, SubmitOutput, TransitionResult,
    DEFAULT_DIMENSION, DEFAULT_LEVEL, DEFAULT_NEW_RULE_DESC, DEFAULT_REWARD_PENALTY_LEVEL,
};
pub use validation::{
    can_edit, can_release, missing_required_fields, validate_iteration_content,
    validate_required_fields, validate_submission, validate_transition, ValidationResult,
    MISSING_ITERATION_CONTENT, MISSING_REQUIRED_FIELDS,
};
