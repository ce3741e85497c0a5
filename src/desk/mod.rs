//! The rule desk service
//!
//! Holds the live collections, hands fresh submissions to an approval
//! authority and applies its decisions as they arrive.

mod approval;
mod history;
mod ids;
mod intent;
mod service;

#[cfg(test)]
mod tests;

pub use approval::{
    authority_for, ApprovalAuthority, ApprovalEvent, DelayedApproval, ImmediateApproval,
    ManualApproval,
};
pub use history::VersionLog;
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use intent::{Intent, IntentOutcome};
pub use service::{today, Desk, Snapshot};
