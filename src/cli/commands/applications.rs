//! Applications command - List change applications

use crate::cli::render::render_application_list;
use crate::cli::{ApplicationArgs, Ctx};
use crate::errors::Result;
use crate::views::{
    parse_application_status_label, parse_application_type_label, parse_choice,
    ApplicationFilter, ALL_DIMENSIONS, ALL_LEVELS,
};

/// Translate command-line selections into an application filter
///
/// # Errors
/// * `InvalidArgument` - An unknown type or status label
pub fn filter(args: &ApplicationArgs) -> Result<ApplicationFilter> {
    Ok(ApplicationFilter {
        reward_penalty_level: args
            .level
            .as_deref()
            .and_then(|l| parse_choice(l, ALL_LEVELS)),
        dimension: args
            .dimension
            .as_deref()
            .and_then(|d| parse_choice(d, ALL_DIMENSIONS)),
        item: args.item.clone(),
        application_type: match args.application_type.as_deref() {
            Some(label) => parse_application_type_label(label)?,
            None => None,
        },
        status: match args.status.as_deref() {
            Some(label) => parse_application_status_label(label)?,
            None => None,
        },
    })
}

pub async fn run(ctx: &Ctx, args: &ApplicationArgs) -> Result<()> {
    let filter = filter(args)?;
    let desk = ctx.open_desk()?;
    let applications = filter.apply(desk.applications());

    if ctx.json {
        ctx.print_json(&applications)
    } else {
        println!("{}", render_application_list(&applications));
        Ok(())
    }
}
