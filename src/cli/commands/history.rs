//! History command - Show a rule's recorded versions

use crate::cli::render::render_history;
use crate::cli::Ctx;
use crate::errors::Result;

pub async fn run(ctx: &Ctx, rule_id: &str) -> Result<()> {
    let desk = ctx.open_desk()?;
    let versions = desk.history(rule_id);

    if ctx.json {
        ctx.print_json(&versions)
    } else {
        println!("{}", render_history(rule_id, &versions));
        Ok(())
    }
}
