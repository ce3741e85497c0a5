//! Stats command - Count rules per level

use crate::cli::render::render_stats;
use crate::cli::Ctx;
use crate::errors::Result;
use crate::views::RuleStats;

pub async fn run(ctx: &Ctx) -> Result<()> {
    let desk = ctx.open_desk()?;
    let stats = RuleStats::of(desk.rules());

    if ctx.json {
        ctx.print_json(&stats)
    } else {
        println!("{}", render_stats(&stats));
        Ok(())
    }
}
