//! Show command - Show a rule or an application

use serde::Serialize;

use crate::cli::render::{render_application, render_rule};
use crate::cli::Ctx;
use crate::errors::{Result, RuledeskError};
use crate::schemas::{Application, Rule};

/// Rules and applications have separate id spaces, so one id can name both
#[derive(Debug, Serialize)]
struct Found<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<&'a Rule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    application: Option<&'a Application>,
}

pub async fn run(ctx: &Ctx, id: &str) -> Result<()> {
    let desk = ctx.open_desk()?;
    let found = Found {
        rule: desk.rule(id),
        application: desk.application(id),
    };

    if found.rule.is_none() && found.application.is_none() {
        return Err(RuledeskError::InvalidArgument(format!(
            "no rule or application with id {}",
            id
        )));
    }

    if ctx.json {
        return ctx.print_json(&found);
    }

    let sections: Vec<String> = found
        .rule
        .map(render_rule)
        .into_iter()
        .chain(found.application.map(render_application))
        .collect();
    println!("{}", sections.join("\n\n"));
    Ok(())
}
