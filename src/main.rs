//! Ruledesk CLI - Governance desk for reward/penalty rules

use clap::Parser;
use ruledesk::cli::commands;
use ruledesk::cli::{Cli, Commands};
use ruledesk::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> ruledesk::Result<()> {
    let ctx = cli.context();
    match cli.command {
        Some(Commands::Init { force }) => commands::init::run(&ctx, force).await,
        Some(Commands::Rules(args)) => commands::rules::run(&ctx, &args).await,
        Some(Commands::Applications(args)) => commands::applications::run(&ctx, &args).await,
        Some(Commands::Dev(args)) => commands::dev::run(&ctx, &args).await,
        Some(Commands::Pending(args)) => commands::pending::run(&ctx, &args).await,
        Some(Commands::Stats) => commands::stats::run(&ctx).await,
        Some(Commands::Show { id }) => commands::show::run(&ctx, &id).await,
        Some(Commands::History { id }) => commands::history::run(&ctx, &id).await,
        Some(Commands::Doctor) => commands::doctor::run(&ctx).await,
        Some(Commands::Session { file, save }) => {
            commands::session::run(&ctx, file.as_deref(), save.as_deref()).await
        }
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
