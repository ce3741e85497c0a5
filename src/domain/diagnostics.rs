//! Consistency checks over a desk's collections

use serde::Serialize;

use crate::schemas::{Application, ApplicationStatus, ApplicationType, DevStatus, Rule};

use super::lineage::{duplicate_active_lineages, DuplicateActive};

/// Something in the data that the lifecycle would never produce on its own
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// Several Active rules for one item pair and level
    DuplicateActive {
        key: String,
        rule_ids: Vec<String>,
    },
    /// An iteration pointing at a rule that is not in the catalog
    DanglingRuleReference {
        application: String,
        rule: String,
    },
    /// An application whose status disagrees with its dev status
    DevStatusMismatch {
        application: String,
        status: ApplicationStatus,
        dev_status: DevStatus,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::DuplicateActive { key, rule_ids } => {
                write!(f, "active rules {} share {}", rule_ids.join(", "), key)
            }
            Diagnostic::DanglingRuleReference { application, rule } => {
                write!(f, "application {} iterates unknown rule {}", application, rule)
            }
            Diagnostic::DevStatusMismatch {
                application,
                status,
                dev_status,
            } => write!(
                f,
                "application {} is {} but its dev status is {}",
                application, status, dev_status
            ),
        }
    }
}

impl From<DuplicateActive> for Diagnostic {
    fn from(duplicate: DuplicateActive) -> Self {
        Diagnostic::DuplicateActive {
            key: duplicate.key.to_string(),
            rule_ids: duplicate.rule_ids,
        }
    }
}

fn dev_status_mismatch(app: &Application) -> Option<Diagnostic> {
    let dev_status = app.dev_status?;
    let derived = matches!(
        app.status,
        ApplicationStatus::InDev | ApplicationStatus::ReadyToRelease
    );
    if derived && app.status != dev_status.implied_status() {
        return Some(Diagnostic::DevStatusMismatch {
            application: app.id.clone(),
            status: app.status,
            dev_status,
        });
    }
    None
}

fn dangling_reference(app: &Application, rules: &[Rule]) -> Option<Diagnostic> {
    if app.application_type != ApplicationType::Iterate || app.status == ApplicationStatus::Released
    {
        return None;
    }
    let rule = app.rule_id.as_deref().filter(|id| !id.is_empty())?;
    if rules.iter().any(|r| r.id == rule) {
        return None;
    }
    Some(Diagnostic::DanglingRuleReference {
        application: app.id.clone(),
        rule: rule.to_string(),
    })
}

/// Run every check
pub fn diagnose(rules: &[Rule], applications: &[Application]) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = duplicate_active_lineages(rules)
        .into_iter()
        .map(Diagnostic::from)
        .collect();

    for app in applications {
        diagnostics.extend(dangling_reference(app, rules));
        diagnostics.extend(dev_status_mismatch(app));
    }

    diagnostics
}
