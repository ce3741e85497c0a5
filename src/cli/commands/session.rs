//! Session command - Apply a stream of JSON intents to a desk
//!
//! Each non-blank line is one [`Intent`]. Lines starting with `#` are skipped.
//! Approvals that arrived while earlier lines ran are applied before the next
//! line, and the session settles every outstanding approval before it ends.

use std::path::Path;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::cli::Ctx;
use crate::desk::{Desk, Intent, IntentOutcome};
use crate::errors::{Result, RuledeskError};
use crate::fs::write_json;

/// Result of one session line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Step {
    Applied {
        line: usize,
        #[serde(flatten)]
        outcome: IntentOutcome,
    },
    /// Refused by validation or a lifecycle precondition; the session goes on
    Failed {
        line: usize,
        error: &'static str,
        message: String,
    },
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Applied { line, outcome } => write!(f, "{}: {}", line, outcome),
            Step::Failed { line, message, .. } => write!(f, "{}: failed: {}", line, message),
        }
    }
}

/// Totals over a whole session
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    pub applied: usize,
    pub failed: usize,
    /// Approval events applied, whenever they landed
    pub approved: usize,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} applied, {} failed, {} approved",
            self.applied, self.failed, self.approved
        )
    }
}

/// Errors that end one line but not the session
fn recoverable(error: &RuledeskError) -> bool {
    matches!(
        error,
        RuledeskError::Validation(_) | RuledeskError::StateTransition(_)
    )
}

/// Read intents from `input` until EOF, reporting every step to `emit`.
///
/// # Errors
/// * `InvalidJson` - A line is not an intent; the session stops there
/// * `Io` - Reading the input failed
pub async fn drive<R>(
    desk: &mut Desk,
    input: R,
    mut emit: impl FnMut(&Step),
) -> Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = SessionSummary::default();
    let mut lines = input.lines();
    let mut number = 0;

    while let Some(line) = lines.next_line().await? {
        number += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let intent = Intent::parse(line).map_err(|e| match e {
            RuledeskError::InvalidJson(msg) => {
                RuledeskError::InvalidJson(format!("line {}: {}", number, msg))
            }
            other => other,
        })?;

        summary.approved += desk.pump_approvals();
        debug!("Line {}: {:?}", number, intent);

        let result = match intent {
            Intent::Settle => {
                let approved = desk.settle().await;
                summary.approved += approved;
                Ok(IntentOutcome::Settled { approved })
            }
            other => desk.apply_intent(other),
        };

        let step = match result {
            Ok(outcome) => {
                summary.applied += 1;
                Step::Applied {
                    line: number,
                    outcome,
                }
            }
            Err(e) if recoverable(&e) => {
                warn!("Line {} failed: {}", number, e);
                summary.failed += 1;
                Step::Failed {
                    line: number,
                    error: e.code(),
                    message: e.to_string(),
                }
            }
            Err(e) => return Err(e),
        };
        emit(&step);
    }

    if desk.outstanding_approvals() > 0 {
        info!("Waiting for {} approval(s)", desk.outstanding_approvals());
    }
    summary.approved += desk.settle().await;
    Ok(summary)
}

fn read_script(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RuledeskError::FileNotFound(path.display().to_string())
        } else {
            RuledeskError::Io(e)
        }
    })
}

/// Apply intents from a file or stdin, then optionally save the result as a seed file
pub async fn run(ctx: &Ctx, file: Option<&Path>, save: Option<&Path>) -> Result<()> {
    let mut desk = ctx.open_desk()?;
    let json = ctx.json;
    let print = |step: &Step| {
        if json {
            match serde_json::to_string(step) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!("Could not serialize step: {}", e),
            }
        } else {
            println!("{}", step);
        }
    };

    let summary = match file {
        Some(path) => {
            let script = read_script(path)?;
            drive(&mut desk, script.as_bytes(), print).await?
        }
        None => drive(&mut desk, BufReader::new(tokio::io::stdin()), print).await?,
    };

    if let Some(path) = save {
        write_json(path, &desk.snapshot())?;
        info!(
            "Saved {} rules and {} applications to {}",
            desk.rules().len(),
            desk.applications().len(),
            path.display()
        );
    }

    if json {
        ctx.print_json(&summary)
    } else {
        println!("{}", summary);
        Ok(())
    }
}
