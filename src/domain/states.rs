//! Application state machine definitions
//!
//! The happy path is linear:
//! Draft → Pending → Approved → In Dev → Ready to Release → Released
//!
//! Pending may branch to Rejected; Rejected and Draft loop back through
//! re-editing. Dev-status writes move freely between In Dev and Ready to
//! Release.

use crate::schemas::{ApplicationStatus, DevStatus};

/// The canonical ordering of the approval → development → release pipeline.
///
/// Rejected is a side branch and has no position here.
pub const APPLICATION_PIPELINE: &[ApplicationStatus] = &[
    ApplicationStatus::Draft,
    ApplicationStatus::Pending,
    ApplicationStatus::Approved,
    ApplicationStatus::InDev,
    ApplicationStatus::ReadyToRelease,
    ApplicationStatus::Released,
];

/// Statuses shown on the development tracking board
pub const DEV_BOARD_STATUSES: &[ApplicationStatus] = &[
    ApplicationStatus::Approved,
    ApplicationStatus::InDev,
    ApplicationStatus::ReadyToRelease,
];

/// Get the 0-based position of a status in the pipeline, or `None` for Rejected.
pub fn get_status_index(status: ApplicationStatus) -> Option<usize> {
    APPLICATION_PIPELINE.iter().position(|&s| s == status)
}

/// Returns the statuses reachable from `current` through a single named transition.
pub fn get_allowed_next_statuses(current: ApplicationStatus) -> Vec<ApplicationStatus> {
    use ApplicationStatus::*;
    match current {
        Draft | Rejected => vec![Draft, Pending],
        Pending => vec![Approved, Rejected],
        Approved | InDev => vec![InDev, ReadyToRelease],
        ReadyToRelease => vec![InDev, ReadyToRelease, Released],
        Released => vec![],
    }
}

/// The status a dev-status write implies.
///
/// Every dev-status write goes through this; callers never pick `status`.
pub fn derive_status(dev_status: DevStatus) -> ApplicationStatus {
    dev_status.implied_status()
}

/// Check if a status is terminal (Released).
pub fn is_terminal_status(status: ApplicationStatus) -> bool {
    status == ApplicationStatus::Released
}

/// Whether an application in this status may be re-edited and resubmitted.
pub fn is_editable_status(status: ApplicationStatus) -> bool {
    matches!(status, ApplicationStatus::Draft | ApplicationStatus::Rejected)
}

/// Whether an application in this status belongs on the development board.
pub fn is_on_dev_board(status: ApplicationStatus) -> bool {
    DEV_BOARD_STATUSES.contains(&status)
}
