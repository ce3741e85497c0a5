//! Init command - Create a ruledesk workspace

use tracing::info;

use crate::cli::Ctx;
use crate::errors::{Result, RuledeskError};
use crate::fs::{get_config_path, write_config};
use crate::schemas::Config;

/// Write `.ruledesk/config.json` with the defaults under the working directory
pub async fn run(ctx: &Ctx, force: bool) -> Result<()> {
    let config_path = get_config_path(&ctx.cwd);
    if config_path.exists() && !force {
        return Err(RuledeskError::ConfigError(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    write_config(&ctx.cwd, &Config::default())?;
    info!("Wrote {}", config_path.display());

    if ctx.json {
        ctx.print_json(&Config::default())?;
    } else {
        println!("Initialized ruledesk workspace in {}", ctx.cwd.display());
    }
    Ok(())
}
