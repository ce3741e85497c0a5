//! State transition logic
//!
//! Pure functions for applying lifecycle transitions to the rule and
//! application collections. Every function takes the current collections by
//! reference and returns replacement collections; nothing is mutated in place.

use crate::errors::{Result, RuledeskError};
use crate::schemas::{
    Application, ApplicationDraft, ApplicationStatus, ApplicationType, DevStatus, ReleaseDefaults,
    Rule, RuleStatus, SubmitMode, SubmitRequest,
};

use super::validation::{can_edit, can_release, validate_submission, validate_transition};

/// Level assumed when the form leaves it blank
pub const DEFAULT_LEVEL: &str = "全环节";

/// Reward/penalty level assumed when the form leaves it blank
pub const DEFAULT_REWARD_PENALTY_LEVEL: &str = "地区";

/// Dimension assumed when the form leaves it blank
pub const DEFAULT_DIMENSION: &str = "风控";

/// Description used for new-rule applications with no logic
pub const DEFAULT_NEW_RULE_DESC: &str = "新增规则申请";

/// Result of a transition attempt
#[derive(Debug)]
pub enum TransitionResult<T> {
    /// The transition happened; `next` replaces the current state
    Applied {
        next: T,
    },
    /// No record with this id; callers treat this as a silent no-op
    NotFound {
        id: String,
    },
    /// The record exists but its current state does not allow the transition
    Refused {
        reason: String,
    },
}

impl<T> TransitionResult<T> {
    /// Check if the transition was applied
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionResult::Applied { .. })
    }

    /// Get the next state if the transition was applied
    pub fn next(self) -> Option<T> {
        match self {
            TransitionResult::Applied { next } => Some(next),
            _ => None,
        }
    }
}

/// Records addressable by id
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Rule {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Application {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Copy `items`, replacing every record whose id matches. `None` if nothing matched.
fn update_matching<T, F>(items: &[T], id: &str, update: F) -> Option<Vec<T>>
where
    T: Keyed + Clone,
    F: Fn(T) -> T,
{
    if !items.iter().any(|item| item.key() == id) {
        return None;
    }
    Some(
        items
            .iter()
            .cloned()
            .map(|item| if item.key() == id { update(item) } else { item })
            .collect(),
    )
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Inputs of a submission that do not come from the form
#[derive(Debug, Clone)]
pub struct SubmissionContext<'a> {
    /// Id for the application: a fresh one, or the edited application's id
    pub application_id: String,
    /// Recorded as the creator
    pub creator: &'a str,
    /// Today's date, `YYYY-MM-DD`
    pub today: &'a str,
}

/// A successful submission
#[derive(Debug, Clone)]
pub struct SubmitOutput {
    /// The replacement application collection
    pub applications: Vec<Application>,
    /// The stored application
    pub application: Application,
    /// `false` when an existing application was re-edited
    pub fresh: bool,
}

/// Normalize a form payload into an application.
///
/// Blank classification fields get their defaults, blank optional text becomes
/// `None`, and the version follows the iterated rule when none is given.
pub fn build_application(
    draft: &ApplicationDraft,
    mode: SubmitMode,
    status: ApplicationStatus,
    rules: &[Rule],
    ctx: &SubmissionContext<'_>,
) -> Application {
    let iterating =
        mode == SubmitMode::Iterate || draft.application_type == Some(ApplicationType::Iterate);
    let application_type = if iterating {
        ApplicationType::Iterate
    } else {
        ApplicationType::New
    };

    let desc = match mode {
        SubmitMode::Iterate => draft.iterate_content.clone(),
        SubmitMode::Create => or_default(&draft.logic, DEFAULT_NEW_RULE_DESC),
    };

    let rule_id = draft.rule_id.as_deref().and_then(non_empty);
    let predecessor_version = match (iterating, rule_id.as_deref()) {
        (true, Some(id)) => rules.iter().find(|r| r.id == id).map(|r| r.version),
        _ => None,
    };

    Application {
        id: ctx.application_id.clone(),
        rule_id,
        level: or_default(&draft.level, DEFAULT_LEVEL),
        reward_penalty_level: Some(or_default(
            &draft.reward_penalty_level,
            DEFAULT_REWARD_PENALTY_LEVEL,
        )),
        dimension: or_default(&draft.dimension, DEFAULT_DIMENSION),
        item1: draft.item1.clone(),
        item2: draft.item2.clone(),
        application_type,
        desc,
        logic: non_empty(&draft.logic),
        reason: draft.reason.clone(),
        creator: ctx.creator.to_string(),
        create_time: ctx.today.to_string(),
        version: draft.version.or(predecessor_version).unwrap_or(1),
        status,
        reward_std: non_empty(&draft.reward_std),
        penalty_std: non_empty(&draft.penalty_std),
        target: non_empty(&draft.target),
        org: non_empty(&draft.org),
        owner: non_empty(&draft.owner),
        dev_owner: None,
        dev_status: None,
        traction: draft.traction.clone(),
        calculation: draft.calculation.clone(),
        online: draft.online.clone(),
    }
}

/// Create, draft or re-edit an application.
///
/// # Errors
/// * `Validation` - a Pending submission is missing required fields; nothing changes
pub fn submit_application(
    applications: &[Application],
    rules: &[Rule],
    request: &SubmitRequest,
    ctx: &SubmissionContext<'_>,
) -> Result<TransitionResult<SubmitOutput>> {
    let validation = validate_submission(&request.draft, request.mode, request.desired);
    if !validation.valid {
        return Err(RuledeskError::Validation(
            validation.reason.unwrap_or_else(|| "submission is invalid".to_string()),
        ));
    }

    let application = build_application(
        &request.draft,
        request.mode,
        request.desired.status(),
        rules,
        ctx,
    );

    let Some(existing_id) = request.existing_id.as_deref() else {
        let mut next = Vec::with_capacity(applications.len() + 1);
        next.push(application.clone());
        next.extend(applications.iter().cloned());
        return Ok(TransitionResult::Applied {
            next: SubmitOutput {
                applications: next,
                application,
                fresh: true,
            },
        });
    };

    let Some(existing) = applications.iter().find(|a| a.id == existing_id) else {
        return Ok(TransitionResult::NotFound {
            id: existing_id.to_string(),
        });
    };

    let editable = can_edit(existing);
    if !editable.valid {
        return Ok(TransitionResult::Refused {
            reason: editable.reason.unwrap_or_default(),
        });
    }

    let replacement = Application {
        id: existing.id.clone(),
        ..application
    };
    let next = update_matching(applications, existing_id, |_| replacement.clone())
        .unwrap_or_else(|| applications.to_vec());

    Ok(TransitionResult::Applied {
        next: SubmitOutput {
            applications: next,
            application: replacement,
            fresh: false,
        },
    })
}

/// Record a dev-status change; `status` is recomputed from `dev_status`
/// regardless of the prior state.
pub fn update_dev_status(
    applications: &[Application],
    id: &str,
    dev_status: DevStatus,
    dev_owner: &str,
) -> TransitionResult<Vec<Application>> {
    match update_matching(applications, id, |app| app.with_dev_status(dev_status, dev_owner)) {
        Some(next) => TransitionResult::Applied { next },
        None => TransitionResult::NotFound { id: id.to_string() },
    }
}

fn decide_pending(
    applications: &[Application],
    id: &str,
    target: ApplicationStatus,
) -> TransitionResult<Vec<Application>> {
    let Some(current) = applications.iter().find(|a| a.id == id) else {
        return TransitionResult::NotFound { id: id.to_string() };
    };

    let validation = validate_transition(current.status, target);
    if !validation.valid {
        return TransitionResult::Refused {
            reason: validation.reason.unwrap_or_default(),
        };
    }

    let next = update_matching(applications, id, |app| match target {
        ApplicationStatus::Approved => app.with_approval(),
        other => app.with_status(other),
    })
    .unwrap_or_else(|| applications.to_vec());

    TransitionResult::Applied { next }
}

/// Pending → Approved, queueing development
pub fn approve_application(
    applications: &[Application],
    id: &str,
) -> TransitionResult<Vec<Application>> {
    decide_pending(applications, id, ApplicationStatus::Approved)
}

/// Pending → Rejected
pub fn reject_application(
    applications: &[Application],
    id: &str,
) -> TransitionResult<Vec<Application>> {
    decide_pending(applications, id, ApplicationStatus::Rejected)
}

/// Inputs of a release that do not come from the application
#[derive(Debug, Clone)]
pub struct ReleaseContext<'a> {
    /// Id for the synthesized rule
    pub rule_id: String,
    /// Today's date, `YYYY-MM-DD`
    pub today: &'a str,
    pub defaults: &'a ReleaseDefaults,
    /// Require the application to be Ready to Release
    pub strict: bool,
}

/// A successful release
#[derive(Debug, Clone)]
pub struct ReleaseOutput {
    pub rules: Vec<Rule>,
    pub applications: Vec<Application>,
    /// The newly active rule
    pub rule: Rule,
    /// Id of the predecessor rule that was retired, if any
    pub retired: Option<String>,
}

/// Find the application a release would promote, without building anything.
///
/// Same `NotFound` and `Refused` outcomes as [`release_application`].
pub fn release_precondition<'a>(
    applications: &'a [Application],
    id: &str,
    strict: bool,
) -> TransitionResult<&'a Application> {
    let Some(application) = applications.iter().find(|a| a.id == id) else {
        return TransitionResult::NotFound { id: id.to_string() };
    };

    let releasable = can_release(application, strict);
    if !releasable.valid {
        return TransitionResult::Refused {
            reason: releasable.reason.unwrap_or_default(),
        };
    }
    TransitionResult::Applied { next: application }
}

/// Build the live rule an application turns into
pub fn synthesize_rule(
    application: &Application,
    predecessor: Option<&Rule>,
    ctx: &ReleaseContext<'_>,
) -> Rule {
    let defaults = ctx.defaults;
    let pick = |value: &Option<String>, fallback: &str| {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(fallback)
            .to_string()
    };

    let logic = application
        .logic
        .as_deref()
        .filter(|l| !l.is_empty())
        .unwrap_or(&application.desc)
        .to_string();

    Rule {
        id: ctx.rule_id.clone(),
        level: application.level.clone(),
        reward_penalty_level: pick(&application.reward_penalty_level, &defaults.reward_penalty_level),
        dimension: application.dimension.clone(),
        item1: application.item1.clone(),
        item2: application.item2.clone(),
        logic,
        reward_std: pick(&application.reward_std, &defaults.standard),
        penalty_std: pick(&application.penalty_std, &defaults.standard),
        target: pick(&application.target, &defaults.target),
        org: pick(&application.org, &defaults.org),
        owner: pick(&application.owner, &application.creator),
        creator: application.creator.clone(),
        first_apply_date: ctx.today.to_string(),
        update_date: String::new(),
        version: application.version.saturating_add(1),
        status: RuleStatus::Active,
        lineage_id: Some(
            predecessor
                .map(|r| r.lineage().to_string())
                .unwrap_or_else(|| ctx.rule_id.clone()),
        ),
    }
}

/// Promote an application into a live rule.
///
/// The application becomes Released, a new Active rule is prepended, and for
/// iterations the referenced rule is marked Inactive.
pub fn release_application(
    rules: &[Rule],
    applications: &[Application],
    id: &str,
    ctx: &ReleaseContext<'_>,
) -> TransitionResult<ReleaseOutput> {
    let application = match release_precondition(applications, id, ctx.strict) {
        TransitionResult::Applied { next } => next,
        TransitionResult::NotFound { id } => return TransitionResult::NotFound { id },
        TransitionResult::Refused { reason } => return TransitionResult::Refused { reason },
    };

    let predecessor = match (application.application_type, application.rule_id.as_deref()) {
        (ApplicationType::Iterate, Some(rule_id)) => rules.iter().find(|r| r.id == rule_id),
        _ => None,
    };

    let rule = synthesize_rule(application, predecessor, ctx);
    let retired = predecessor.map(|r| r.id.clone());

    let remaining = match retired.as_deref() {
        Some(old_id) => update_matching(rules, old_id, |r| r.with_status(RuleStatus::Inactive))
            .unwrap_or_else(|| rules.to_vec()),
        None => rules.to_vec(),
    };

    let mut next_rules = Vec::with_capacity(remaining.len() + 1);
    next_rules.push(rule.clone());
    next_rules.extend(remaining);

    let next_applications = update_matching(applications, id, |a| {
        a.with_status(ApplicationStatus::Released)
    })
    .unwrap_or_else(|| applications.to_vec());

    TransitionResult::Applied {
        next: ReleaseOutput {
            rules: next_rules,
            applications: next_applications,
            rule,
            retired,
        },
    }
}

/// Replace a rule's creator and owner
pub fn manage_permissions(
    rules: &[Rule],
    id: &str,
    creator: &str,
    owner: &str,
) -> TransitionResult<Vec<Rule>> {
    match update_matching(rules, id, |r| r.with_permissions(creator, owner)) {
        Some(next) => TransitionResult::Applied { next },
        None => TransitionResult::NotFound { id: id.to_string() },
    }
}

/// Take a rule offline. Re-activation needs a new application and release.
pub fn offline_rule(rules: &[Rule], id: &str) -> TransitionResult<Vec<Rule>> {
    match update_matching(rules, id, |r| r.with_status(RuleStatus::Inactive)) {
        Some(next) => TransitionResult::Applied { next },
        None => TransitionResult::NotFound { id: id.to_string() },
    }
}

/// Prefill an iteration form from the rule being iterated
pub fn draft_from_rule(rule: &Rule) -> ApplicationDraft {
    ApplicationDraft {
        rule_id: Some(rule.id.clone()),
        application_type: Some(ApplicationType::Iterate),
        level: rule.level.clone(),
        reward_penalty_level: rule.reward_penalty_level.clone(),
        dimension: rule.dimension.clone(),
        item1: rule.item1.clone(),
        item2: rule.item2.clone(),
        logic: rule.logic.clone(),
        iterate_content: String::new(),
        reward_std: rule.reward_std.clone(),
        penalty_std: rule.penalty_std.clone(),
        target: rule.target.clone(),
        org: rule.org.clone(),
        owner: rule.owner.clone(),
        version: Some(rule.version),
        ..Default::default()
    }
}

/// Prefill the edit form from an existing application, with the mode its type implies
pub fn draft_from_application(application: &Application) -> (ApplicationDraft, SubmitMode) {
    let mode = if application.application_type == ApplicationType::Iterate {
        SubmitMode::Iterate
    } else {
        SubmitMode::Create
    };

    let logic = application
        .logic
        .clone()
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| application.desc.clone());
    let iterate_content = match mode {
        SubmitMode::Iterate => application.desc.clone(),
        SubmitMode::Create => String::new(),
    };
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    let draft = ApplicationDraft {
        rule_id: application.rule_id.clone(),
        application_type: Some(application.application_type),
        level: application.level.clone(),
        reward_penalty_level: text(&application.reward_penalty_level),
        dimension: application.dimension.clone(),
        item1: application.item1.clone(),
        item2: application.item2.clone(),
        logic,
        iterate_content,
        reward_std: text(&application.reward_std),
        penalty_std: text(&application.penalty_std),
        target: text(&application.target),
        org: text(&application.org),
        owner: text(&application.owner),
        reason: application.reason.clone(),
        version: Some(application.version),
        is_online: None,
        traction: application.traction.clone(),
        calculation: application.calculation.clone(),
        online: application.online.clone(),
    };

    (draft, mode)
}
