//! Doctor command - Check configuration and data consistency

use serde::Serialize;
use tracing::info;

use crate::cli::render::render_diagnostics;
use crate::cli::Ctx;
use crate::domain::{diagnose, Diagnostic};
use crate::errors::Result;
use crate::schemas::ApprovalMode;

/// Everything doctor found out
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorReport {
    /// Workspace root, if one was found
    pub workspace: Option<String>,
    pub seed: String,
    pub approval_mode: ApprovalMode,
    pub strict_release: bool,
    pub rules: usize,
    pub applications: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl DoctorReport {
    pub fn is_healthy(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Load the workspace and seed, and run every consistency check.
///
/// Config and seed problems surface as errors; data problems become diagnostics.
pub fn examine(ctx: &Ctx) -> Result<DoctorReport> {
    let workspace = ctx.workspace()?;
    let provider = workspace.seed_provider(ctx.seed_override());
    let seed = provider.load()?;
    info!("Checking {} rules and {} applications", seed.rules.len(), seed.applications.len());

    Ok(DoctorReport {
        workspace: workspace.root.as_ref().map(|r| r.display().to_string()),
        seed: provider.describe(),
        approval_mode: workspace.config.approval_mode,
        strict_release: workspace.config.strict_release,
        rules: seed.rules.len(),
        applications: seed.applications.len(),
        diagnostics: diagnose(&seed.rules, &seed.applications),
    })
}

pub async fn run(ctx: &Ctx) -> Result<()> {
    let report = examine(ctx)?;

    if ctx.json {
        return ctx.print_json(&report);
    }

    println!(
        "Workspace: {}",
        report.workspace.as_deref().unwrap_or("none (defaults)")
    );
    println!("Seed: {} ({} rules, {} applications)", report.seed, report.rules, report.applications);
    println!(
        "Approval: {}, strict release: {}",
        report.approval_mode,
        if report.strict_release { "on" } else { "off" }
    );
    println!();
    println!("{}", render_diagnostics(&report.diagnostics));
    Ok(())
}
