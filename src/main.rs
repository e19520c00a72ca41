//! handoff CLI binary entry point.

use clap::Parser;
use handoff::cli::{commands, Cli, Commands};
use handoff::error::HandoffError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handoff=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {e}");
        eprintln!("Hint: {}", e.recovery_suggestion().hint());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), HandoffError> {
    let config = commands::load_config(cli.resources_dir)?;
    match cli.command {
        Commands::Run(args) => commands::handle_run(args, config).await,
        Commands::Scenarios => commands::handle_scenarios(),
        Commands::Check(args) => commands::handle_check(&args.scenario, config),
        Commands::Provision => commands::handle_provision(config).await,
    }
}
