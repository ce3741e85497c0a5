//! Pending command - Show the release queue

use crate::cli::render::render_release_queue;
use crate::cli::{Ctx, PendingArgs};
use crate::errors::Result;
use crate::views::{parse_application_type_label, parse_choice, PendingReleaseFilter, ALL_LEVELS};

pub fn filter(args: &PendingArgs) -> Result<PendingReleaseFilter> {
    Ok(PendingReleaseFilter {
        reward_penalty_level: args
            .level
            .as_deref()
            .and_then(|l| parse_choice(l, ALL_LEVELS)),
        application_type: match args.application_type.as_deref() {
            Some(label) => parse_application_type_label(label)?,
            None => None,
        },
        keyword: args.keyword.clone(),
        creator: args.creator.clone(),
    })
}

pub async fn run(ctx: &Ctx, args: &PendingArgs) -> Result<()> {
    let filter = filter(args)?;
    let desk = ctx.open_desk()?;
    let queue = filter.apply(desk.applications());

    if ctx.json {
        ctx.print_json(&queue)
    } else {
        println!("{}", render_release_queue(&queue));
        Ok(())
    }
}
