//! Dev command - Show the development tracking board

use crate::cli::render::render_dev_board;
use crate::cli::{Ctx, DevArgs};
use crate::errors::Result;
use crate::views::{
    parse_application_type_label, parse_choice, parse_dev_status_label, parse_online_label,
    DevTrackingFilter, ALL_LEVELS,
};

/// Translate command-line selections into a board filter
pub fn filter(args: &DevArgs) -> Result<DevTrackingFilter> {
    Ok(DevTrackingFilter {
        reward_penalty_level: args
            .level
            .as_deref()
            .and_then(|l| parse_choice(l, ALL_LEVELS)),
        application_type: match args.application_type.as_deref() {
            Some(label) => parse_application_type_label(label)?,
            None => None,
        },
        online: match args.online.as_deref() {
            Some(label) => parse_online_label(label)?,
            None => None,
        },
        dev_status: match args.dev_status.as_deref() {
            Some(label) => parse_dev_status_label(label)?,
            None => None,
        },
        dev_owner: args.owner.clone(),
        keyword: args.keyword.clone(),
    })
}

pub async fn run(ctx: &Ctx, args: &DevArgs) -> Result<()> {
    let filter = filter(args)?;
    let desk = ctx.open_desk()?;
    let board = filter.apply(desk.applications());

    if ctx.json {
        ctx.print_json(&board)
    } else {
        println!("{}", render_dev_board(&board));
        Ok(())
    }
}
