//! Human-readable renderer for CLI outputs.
//!
//! Pure formatting; command handlers gather the data and pick between this
//! and `--json`.

use crate::domain::Diagnostic;
use crate::schemas::{Application, Rule};
use crate::views::{
    application_status_label, application_type_label, dev_status_label, online_label,
    rule_status_label, RuleStats,
};

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

pub fn render_rule_list(rules: &[&Rule]) -> String {
    if rules.is_empty() {
        return "No rules found".into();
    }
    let mut out = format!("Rules ({}):\n", rules.len());
    for rule in rules {
        out.push_str(&format!(
            "\n  {} [v{}] {} {} / {} ({})\n",
            rule.id,
            rule.version,
            rule_status_label(rule.status),
            rule.item1,
            rule.item2,
            rule.reward_penalty_level
        ));
        out.push_str(&format!("     Reward: {}\n", rule.reward_std));
        out.push_str(&format!("     Penalty: {}\n", rule.penalty_std));
        out.push_str(&format!("     Creator: {}", rule.creator));
    }
    out
}

pub fn render_application_list(applications: &[&Application]) -> String {
    if applications.is_empty() {
        return "No applications found".into();
    }
    let mut out = format!("Applications ({}):\n", applications.len());
    for app in applications {
        out.push_str(&format!(
            "\n  {} [{}] {} {} / {} ({})\n",
            app.id,
            application_type_label(app.application_type),
            application_status_label(app.status),
            app.item1,
            app.item2,
            or_dash(app.reward_penalty_level.as_deref())
        ));
        out.push_str(&format!("     {} on {}", app.creator, app.create_time));
    }
    out
}

pub fn render_dev_board(applications: &[&Application]) -> String {
    if applications.is_empty() {
        return "Nothing in development".into();
    }
    let mut out = format!("Development board ({}):\n", applications.len());
    for app in applications {
        out.push_str(&format!(
            "\n  {} {} / {} [{}]\n",
            app.id,
            app.item1,
            app.item2,
            dev_status_label(app.effective_dev_status())
        ));
        out.push_str(&format!(
            "     Owner: {}  Online: {}  Status: {}",
            or_dash(app.dev_owner.as_deref()),
            online_label(app.is_online_capable()),
            application_status_label(app.status)
        ));
    }
    out
}

pub fn render_release_queue(applications: &[&Application]) -> String {
    if applications.is_empty() {
        return "Nothing waiting for release".into();
    }
    let mut out = format!("Ready to release ({}):\n", applications.len());
    for app in applications {
        let target = match app.rule_id.as_deref() {
            Some(rule) if !rule.is_empty() => format!("iterates rule {}", rule),
            _ => "new rule".to_string(),
        };
        out.push_str(&format!(
            "\n  {} [{}] {} / {} ({}), {}",
            app.id,
            application_type_label(app.application_type),
            app.item1,
            app.item2,
            or_dash(app.reward_penalty_level.as_deref()),
            target
        ));
    }
    out
}

pub fn render_rule(rule: &Rule) -> String {
    let mut out = String::new();
    out.push_str(&format!("Rule {} (version {})\n", rule.id, rule.version));
    out.push_str(&format!("  Status: {} ({})\n", rule.status, rule_status_label(rule.status)));
    out.push_str(&format!("  Lineage: {}\n", rule.lineage()));
    out.push_str(&format!("  Level: {} / {}\n", rule.level, rule.reward_penalty_level));
    out.push_str(&format!("  Dimension: {}\n", rule.dimension));
    out.push_str(&format!("  Item: {} / {}\n", rule.item1, rule.item2));
    out.push_str(&format!("  Logic: {}\n", rule.logic));
    out.push_str(&format!("  Reward: {}\n", rule.reward_std));
    out.push_str(&format!("  Penalty: {}\n", rule.penalty_std));
    out.push_str(&format!("  Target: {}\n", rule.target));
    out.push_str(&format!("  Org: {}\n", rule.org));
    out.push_str(&format!("  Owner: {}\n", rule.owner));
    out.push_str(&format!("  Creator: {}\n", rule.creator));
    out.push_str(&format!("  First applied: {}", rule.first_apply_date));
    if !rule.update_date.is_empty() {
        out.push_str(&format!("\n  Updated: {}", rule.update_date));
    }
    out
}

pub fn render_application(app: &Application) -> String {
    let mut out = String::new();
    out.push_str(&format!("Application {} (version {})\n", app.id, app.version));
    out.push_str(&format!(
        "  Type: {} ({})\n",
        app.application_type,
        application_type_label(app.application_type)
    ));
    out.push_str(&format!(
        "  Status: {} ({})\n",
        app.status,
        application_status_label(app.status)
    ));
    if let Some(rule) = app.rule_id.as_deref().filter(|r| !r.is_empty()) {
        out.push_str(&format!("  Rule: {}\n", rule));
    }
    out.push_str(&format!(
        "  Level: {} / {}\n",
        app.level,
        or_dash(app.reward_penalty_level.as_deref())
    ));
    out.push_str(&format!("  Dimension: {}\n", app.dimension));
    out.push_str(&format!("  Item: {} / {}\n", app.item1, app.item2));
    out.push_str(&format!("  Description: {}\n", app.desc));
    if let Some(logic) = app.logic.as_deref().filter(|l| !l.is_empty()) {
        out.push_str(&format!("  Logic: {}\n", logic));
    }
    out.push_str(&format!("  Reason: {}\n", app.reason));
    if let Some(dev_status) = app.dev_status {
        out.push_str(&format!(
            "  Development: {} by {}\n",
            dev_status_label(dev_status),
            or_dash(app.dev_owner.as_deref())
        ));
    }
    out.push_str(&format!("  Online: {}\n", online_label(app.is_online_capable())));
    out.push_str(&format!("  Created: {} by {}", app.create_time, app.creator));
    out
}

pub fn render_history(rule_id: &str, versions: &[&Rule]) -> String {
    if versions.is_empty() {
        return format!("No history for rule {}", rule_id);
    }
    let mut out = format!("History of rule {} ({} versions):\n", rule_id, versions.len());
    for rule in versions {
        let date = if rule.update_date.is_empty() {
            rule.first_apply_date.as_str()
        } else {
            rule.update_date.as_str()
        };
        out.push_str(&format!(
            "\n  v{} {} {} {}",
            rule.version, rule.id, rule.status, date
        ));
    }
    out
}

pub fn render_stats(stats: &RuleStats) -> String {
    let mut out = format!("Total rules: {}\n", stats.total);
    for level in &stats.by_level {
        out.push_str(&format!("\n  {}: {}", level.level, level.count));
    }
    out
}

pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "No issues found".into();
    }
    let mut out = format!("Found {} issue(s):\n", diagnostics.len());
    for diagnostic in diagnostics {
        out.push_str(&format!("\n  - {}", diagnostic));
    }
    out
}
