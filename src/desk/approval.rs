//! Approval authorities
//!
//! An authority decides Pending applications out of band. It never touches the
//! desk directly: decisions arrive as [`ApprovalEvent`]s on the desk's channel
//! and are applied when the owner pumps or settles.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::schemas::ApprovalMode;

/// A decision delivered by an approval authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalEvent {
    ApplicationApproved { id: String },
}

/// Decides freshly submitted applications
pub trait ApprovalAuthority: Send + Sync {
    /// Ask for a decision on application `id`.
    ///
    /// Returns `true` when an event will be sent on `events`, now or later.
    fn request(&self, id: &str, events: &UnboundedSender<ApprovalEvent>) -> bool;

    fn name(&self) -> &'static str;
}

/// Approves after a fixed delay on a tokio timer
#[derive(Debug, Clone)]
pub struct DelayedApproval {
    delay: Duration,
}

impl DelayedApproval {
    pub fn new(delay: Duration) -> Self {
        DelayedApproval { delay }
    }
}

impl ApprovalAuthority for DelayedApproval {
    fn request(&self, id: &str, events: &UnboundedSender<ApprovalEvent>) -> bool {
        let event = ApprovalEvent::ApplicationApproved { id: id.to_string() };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(
                "No async runtime for delayed approval of {}; approving immediately",
                id
            );
            return events.send(event).is_ok();
        };

        let delay = self.delay;
        let events = events.clone();
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            // The desk may be gone by now
            let _ = events.send(event);
        });
        true
    }

    fn name(&self) -> &'static str {
        "delayed"
    }
}

/// Approves synchronously, in the same call as the submission
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateApproval;

impl ApprovalAuthority for ImmediateApproval {
    fn request(&self, id: &str, events: &UnboundedSender<ApprovalEvent>) -> bool {
        events
            .send(ApprovalEvent::ApplicationApproved { id: id.to_string() })
            .is_ok()
    }

    fn name(&self) -> &'static str {
        "immediate"
    }
}

/// Never decides on its own; applications wait for an explicit approve or reject
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualApproval;

impl ApprovalAuthority for ManualApproval {
    fn request(&self, id: &str, _events: &UnboundedSender<ApprovalEvent>) -> bool {
        tracing::debug!("Application {} awaits a manual decision", id);
        false
    }

    fn name(&self) -> &'static str {
        "manual"
    }
}

/// Build the authority a configuration asks for
pub fn authority_for(mode: ApprovalMode, delay_ms: u64) -> Box<dyn ApprovalAuthority> {
    match mode {
        ApprovalMode::Delayed => Box::new(DelayedApproval::new(Duration::from_millis(delay_ms))),
        ApprovalMode::Immediate => Box::new(ImmediateApproval),
        ApprovalMode::Manual => Box::new(ManualApproval),
    }
}
