//! Rules command - List the rule catalog

use crate::cli::render::render_rule_list;
use crate::cli::{Ctx, RuleArgs};
use crate::errors::Result;
use crate::views::{parse_choice, RuleFilter, ALL_DIMENSIONS, ALL_LEVELS};

/// Translate command-line selections into a catalog filter
pub fn filter(args: &RuleArgs) -> RuleFilter {
    RuleFilter {
        reward_penalty_level: args
            .level
            .as_deref()
            .and_then(|l| parse_choice(l, ALL_LEVELS)),
        dimension: args
            .dimension
            .as_deref()
            .and_then(|d| parse_choice(d, ALL_DIMENSIONS)),
        item: args.item.clone(),
        standard: args.standard.clone(),
        creator: args.creator.clone(),
    }
}

pub async fn run(ctx: &Ctx, args: &RuleArgs) -> Result<()> {
    let desk = ctx.open_desk()?;
    let rules = filter(args).apply(desk.rules());

    if ctx.json {
        ctx.print_json(&rules)
    } else {
        println!("{}", render_rule_list(&rules));
        Ok(())
    }
}
