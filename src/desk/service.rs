//! The desk: single owner of the rule catalog and the application queue

use serde::Serialize;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::domain::{
    active_siblings, approve_application, draft_from_application, draft_from_rule,
    duplicate_active_lineages, manage_permissions, offline_rule, reject_application,
    release_application, release_precondition, submit_application, update_dev_status,
    DuplicateActive, ReleaseContext, SubmissionContext, TransitionResult,
};
use crate::errors::{Result, RuledeskError};
use crate::schemas::{
    Application, ApplicationDraft, Config, DesiredStatus, DevStatus, Rule, SubmitMode,
    SubmitRequest,
};
use crate::seed::Seed;

use super::approval::{authority_for, ApprovalAuthority, ApprovalEvent};
use super::history::VersionLog;
use super::ids::{IdGenerator, UuidIds};
use super::intent::{Intent, IntentOutcome};

/// Today's UTC date as stored on records
pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Read-only view of both collections
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub rules: &'a [Rule],
    pub applications: &'a [Application],
}

/// Owns the rules, the applications and the approval channel.
///
/// Every operation takes `&mut self`; approval decisions only land when the
/// owner calls [`Desk::pump_approvals`] or [`Desk::settle`].
pub struct Desk {
    config: Config,
    rules: Vec<Rule>,
    applications: Vec<Application>,
    history: VersionLog,
    ids: Box<dyn IdGenerator>,
    authority: Box<dyn ApprovalAuthority>,
    approvals_tx: UnboundedSender<ApprovalEvent>,
    approvals_rx: UnboundedReceiver<ApprovalEvent>,
    /// Approval events promised by the authority and not yet received
    outstanding: usize,
}

impl std::fmt::Debug for Desk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Desk")
            .field("rules", &self.rules.len())
            .field("applications", &self.applications.len())
            .field("authority", &self.authority.name())
            .field("outstanding", &self.outstanding)
            .finish()
    }
}

impl Desk {
    /// Create a desk over seed data, with the authority the config asks for
    pub fn new(config: Config, seed: Seed) -> Self {
        let authority = authority_for(config.approval_mode, config.approval_delay_ms);
        let (approvals_tx, approvals_rx) = unbounded_channel();
        let history = VersionLog::seeded(&seed.rules);

        info!(
            "Loaded {} rules and {} applications (approval: {})",
            seed.rules.len(),
            seed.applications.len(),
            authority.name()
        );

        Desk {
            config,
            rules: seed.rules,
            applications: seed.applications,
            history,
            ids: Box::new(UuidIds),
            authority,
            approvals_tx,
            approvals_rx,
            outstanding: 0,
        }
    }

    /// Replace the id generator
    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Replace the approval authority
    pub fn with_authority(mut self, authority: impl ApprovalAuthority + 'static) -> Self {
        self.authority = Box::new(authority);
        self
    }

    // ===== READ-ONLY VIEWS =====

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn application(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == id)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            rules: &self.rules,
            applications: &self.applications,
        }
    }

    /// Every recorded version of the lineage `rule_id` belongs to, oldest first
    pub fn history(&self, rule_id: &str) -> Vec<&Rule> {
        let lineage = match self.rule(rule_id) {
            Some(rule) => Some(rule.lineage()),
            None => self.history.lineage_of(rule_id),
        };
        lineage
            .map(|lineage| self.history.lineage(lineage))
            .unwrap_or_default()
    }

    /// Groups of Active rules that share an item pair and level
    pub fn duplicate_active_lineages(&self) -> Vec<DuplicateActive> {
        duplicate_active_lineages(&self.rules)
    }

    /// Approval events still expected from the authority
    pub fn outstanding_approvals(&self) -> usize {
        self.outstanding
    }

    // ===== FORM PREFILL =====

    /// Iteration form for a live rule
    pub fn prefill_iteration(&self, rule_id: &str) -> Option<ApplicationDraft> {
        self.rule(rule_id).map(draft_from_rule)
    }

    /// Edit form for an existing application
    pub fn prefill_edit(&self, application_id: &str) -> Option<(ApplicationDraft, SubmitMode)> {
        self.application(application_id).map(draft_from_application)
    }

    // ===== OPERATIONS =====

    /// Create, save or re-edit an application.
    ///
    /// Fresh Pending submissions are handed to the approval authority. Returns
    /// the stored application, or `None` when re-editing an unknown id.
    ///
    /// # Errors
    /// * `Validation` - required fields or iteration content missing
    /// * `StateTransition` - the edited application is no longer editable
    pub fn submit(&mut self, request: SubmitRequest) -> Result<Option<Application>> {
        let application_id = match &request.existing_id {
            Some(id) => id.clone(),
            None => self.ids.next_id(),
        };
        let today = today();
        let ctx = SubmissionContext {
            application_id,
            creator: &self.config.current_user,
            today: &today,
        };

        let output = match submit_application(&self.applications, &self.rules, &request, &ctx)? {
            TransitionResult::Applied { next } => next,
            TransitionResult::NotFound { id } => {
                warn!("Cannot re-edit application {}: not found", id);
                return Ok(None);
            }
            TransitionResult::Refused { reason } => {
                return Err(RuledeskError::StateTransition(reason));
            }
        };

        let id = output.application.id.clone();
        info!(
            "{} application {} ({}, {})",
            if output.fresh { "Created" } else { "Updated" },
            id,
            request.mode,
            output.application.status
        );
        self.applications = output.applications;

        if output.fresh && request.desired == DesiredStatus::Pending {
            self.request_approval(&id);
            self.pump_approvals();
        }

        Ok(self.application(&id).cloned())
    }

    /// Save without validation
    pub fn save_draft(
        &mut self,
        draft: ApplicationDraft,
        mode: SubmitMode,
    ) -> Result<Option<Application>> {
        self.submit(SubmitRequest::draft(draft, mode))
    }

    /// Submit a fresh application for approval
    pub fn submit_for_approval(
        &mut self,
        draft: ApplicationDraft,
        mode: SubmitMode,
    ) -> Result<Option<Application>> {
        self.submit(SubmitRequest::submit(draft, mode))
    }

    /// Propose a change to a live rule, prefilled from the rule itself
    pub fn iterate(
        &mut self,
        rule_id: &str,
        content: &str,
        reason: &str,
        desired: DesiredStatus,
    ) -> Result<Option<Application>> {
        let Some(mut draft) = self.prefill_iteration(rule_id) else {
            warn!("Cannot iterate rule {}: not found", rule_id);
            return Ok(None);
        };
        draft.iterate_content = content.to_string();
        draft.reason = reason.to_string();

        self.submit(SubmitRequest {
            draft,
            mode: SubmitMode::Iterate,
            existing_id: None,
            desired,
        })
    }

    /// Record development progress. Returns whether the application exists.
    pub fn update_dev_status(&mut self, id: &str, dev_status: DevStatus, dev_owner: &str) -> bool {
        match update_dev_status(&self.applications, id, dev_status, dev_owner) {
            TransitionResult::Applied { next } => {
                self.applications = next;
                info!("Application {} is {} ({})", id, dev_status, dev_owner);
                true
            }
            _ => {
                warn!("Cannot update dev status of {}: not found", id);
                false
            }
        }
    }

    /// Promote an application into a live rule.
    ///
    /// Returns the new rule, or `None` when the application does not exist.
    ///
    /// # Errors
    /// * `StateTransition` - strict release is on and the application is not Ready to Release
    pub fn release(&mut self, id: &str) -> Result<Option<Rule>> {
        Ok(self.release_retiring(id)?.map(|(rule, _)| rule))
    }

    /// Like [`Desk::release`], also returning the id of the retired predecessor
    pub fn release_retiring(&mut self, id: &str) -> Result<Option<(Rule, Option<String>)>> {
        // Refused and unknown releases must not consume an id
        let strict = self.config.strict_release;
        let version = match release_precondition(&self.applications, id, strict) {
            TransitionResult::Applied { next } => next.version,
            TransitionResult::NotFound { .. } => {
                warn!("Cannot release application {}: not found", id);
                return Ok(None);
            }
            TransitionResult::Refused { reason } => {
                return Err(RuledeskError::StateTransition(reason));
            }
        };
        if version == u32::MAX {
            warn!("Application {} is at the last version; the new rule keeps it", id);
        }

        let today = today();
        let ctx = ReleaseContext {
            rule_id: self.ids.next_id(),
            today: &today,
            defaults: &self.config.release_defaults,
            strict,
        };

        let output = match release_application(&self.rules, &self.applications, id, &ctx) {
            TransitionResult::Applied { next } => next,
            TransitionResult::NotFound { .. } => {
                warn!("Cannot release application {}: not found", id);
                return Ok(None);
            }
            TransitionResult::Refused { reason } => {
                return Err(RuledeskError::StateTransition(reason));
            }
        };

        let siblings = active_siblings(&output.rules, &output.rule);
        if !siblings.is_empty() {
            warn!(
                "Rule {} shares its items with active rule(s) {}",
                output.rule.id,
                siblings.join(", ")
            );
        }

        match &output.retired {
            Some(old) => info!(
                "Released {} as rule {} v{}, retiring {}",
                id, output.rule.id, output.rule.version, old
            ),
            None => info!(
                "Released {} as rule {} v{}",
                id, output.rule.id, output.rule.version
            ),
        }

        self.history.record(&output.rule);
        self.rules = output.rules;
        self.applications = output.applications;
        Ok(Some((output.rule, output.retired)))
    }

    /// Replace a rule's creator and owner. Returns whether the rule exists.
    pub fn manage_permissions(&mut self, rule_id: &str, creator: &str, owner: &str) -> bool {
        match manage_permissions(&self.rules, rule_id, creator, owner) {
            TransitionResult::Applied { next } => {
                self.rules = next;
                info!("Rule {} now created by {}, owned by {}", rule_id, creator, owner);
                true
            }
            _ => {
                warn!("Cannot change permissions of rule {}: not found", rule_id);
                false
            }
        }
    }

    /// Take a rule offline. Returns whether the rule exists.
    pub fn offline_rule(&mut self, rule_id: &str) -> bool {
        match offline_rule(&self.rules, rule_id) {
            TransitionResult::Applied { next } => {
                self.rules = next;
                info!("Rule {} is offline", rule_id);
                true
            }
            _ => {
                warn!("Cannot take rule {} offline: not found", rule_id);
                false
            }
        }
    }

    /// Approve a Pending application. Returns whether it exists.
    ///
    /// # Errors
    /// * `StateTransition` - the application is not Pending
    pub fn approve(&mut self, id: &str) -> Result<bool> {
        let result = approve_application(&self.applications, id);
        self.decide(id, result, "approved")
    }

    /// Reject a Pending application. Returns whether it exists.
    ///
    /// # Errors
    /// * `StateTransition` - the application is not Pending
    pub fn reject(&mut self, id: &str) -> Result<bool> {
        let result = reject_application(&self.applications, id);
        self.decide(id, result, "rejected")
    }

    fn decide(
        &mut self,
        id: &str,
        result: TransitionResult<Vec<Application>>,
        verb: &str,
    ) -> Result<bool> {
        match result {
            TransitionResult::Applied { next } => {
                self.applications = next;
                info!("Application {} {}", id, verb);
                Ok(true)
            }
            TransitionResult::NotFound { .. } => {
                warn!("Cannot mark {} {}: not found", id, verb);
                Ok(false)
            }
            TransitionResult::Refused { reason } => Err(RuledeskError::StateTransition(reason)),
        }
    }

    // ===== APPROVAL CHANNEL =====

    fn request_approval(&mut self, id: &str) {
        if self.authority.request(id, &self.approvals_tx) {
            self.outstanding += 1;
            debug!("Approval of {} requested from {} authority", id, self.authority.name());
        }
    }

    /// Apply one approval event. Decisions for applications that have moved on are dropped.
    fn apply_approval(&mut self, event: ApprovalEvent) -> bool {
        self.outstanding = self.outstanding.saturating_sub(1);
        let ApprovalEvent::ApplicationApproved { id } = event;

        match approve_application(&self.applications, &id) {
            TransitionResult::Applied { next } => {
                self.applications = next;
                info!("Application {} approved", id);
                true
            }
            TransitionResult::NotFound { .. } => {
                warn!("Approval for unknown application {} dropped", id);
                false
            }
            TransitionResult::Refused { reason } => {
                debug!("Approval for {} dropped: {}", id, reason);
                false
            }
        }
    }

    /// Apply every approval event that has already arrived. Returns how many applied.
    pub fn pump_approvals(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.approvals_rx.try_recv() {
            if self.apply_approval(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for every outstanding approval and apply it. Returns how many applied.
    pub async fn settle(&mut self) -> usize {
        let mut applied = self.pump_approvals();
        while self.outstanding > 0 {
            let Some(event) = self.approvals_rx.recv().await else {
                break;
            };
            if self.apply_approval(event) {
                applied += 1;
            }
        }
        applied
    }

    // ===== INTENTS =====

    /// Apply one intent.
    ///
    /// `Settle` only pumps what already arrived; callers that can await use
    /// [`Desk::settle`] instead.
    pub fn apply_intent(&mut self, intent: Intent) -> Result<IntentOutcome> {
        let outcome = match intent {
            Intent::Submit {
                draft,
                mode,
                existing,
            } => self.submit_outcome(draft, mode, existing, DesiredStatus::Pending)?,
            Intent::SaveDraft {
                draft,
                mode,
                existing,
            } => self.submit_outcome(draft, mode, existing, DesiredStatus::Draft)?,
            Intent::Iterate {
                rule,
                content,
                reason,
                desired,
            } => match self.iterate(&rule, &content, &reason, desired)? {
                Some(app) => IntentOutcome::Submitted {
                    id: app.id,
                    status: app.status,
                },
                None => IntentOutcome::Ignored { id: rule },
            },
            Intent::UpdateDevStatus { id, status, owner } => {
                let found = self.update_dev_status(&id, status, &owner);
                updated_or_ignored(found, id)
            }
            Intent::Release { id } => match self.release_retiring(&id)? {
                Some((rule, retired)) => IntentOutcome::Released {
                    application: id,
                    rule: rule.id,
                    retired,
                },
                None => IntentOutcome::Ignored { id },
            },
            Intent::Offline { id } => {
                let found = self.offline_rule(&id);
                updated_or_ignored(found, id)
            }
            Intent::Permissions { id, creator, owner } => {
                let found = self.manage_permissions(&id, &creator, &owner);
                updated_or_ignored(found, id)
            }
            Intent::Approve { id } => {
                let found = self.approve(&id)?;
                updated_or_ignored(found, id)
            }
            Intent::Reject { id } => {
                let found = self.reject(&id)?;
                updated_or_ignored(found, id)
            }
            Intent::Settle => IntentOutcome::Settled {
                approved: self.pump_approvals(),
            },
        };
        Ok(outcome)
    }

    fn submit_outcome(
        &mut self,
        draft: ApplicationDraft,
        mode: SubmitMode,
        existing: Option<String>,
        desired: DesiredStatus,
    ) -> Result<IntentOutcome> {
        let request = SubmitRequest {
            draft,
            mode,
            existing_id: existing.clone(),
            desired,
        };
        Ok(match self.submit(request)? {
            Some(app) => IntentOutcome::Submitted {
                id: app.id,
                status: app.status,
            },
            None => IntentOutcome::Ignored {
                id: existing.unwrap_or_default(),
            },
        })
    }
}

fn updated_or_ignored(found: bool, id: String) -> IntentOutcome {
    if found {
        IntentOutcome::Updated { id }
    } else {
        IntentOutcome::Ignored { id }
    }
}
