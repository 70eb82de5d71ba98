use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod errors;

use commands::scan_cmd::ScanArgs;
use commands::sync_cmd::SyncArgs;
use commands::tier_cmd::ValidateTierArgs;

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// RepoSteward CLI: check and reconcile repository governance policy
#[derive(Parser)]
#[command(name = "repo-steward")]
#[command(about = "Check and reconcile GitHub repository governance policy", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a repository against the declared policy (read-only)
    #[command()]
    Scan(ScanArgs),

    /// Push the declared protection policy onto GitHub
    #[command()]
    Sync(SyncArgs),

    /// Validate declared ruleset names against the repository tier
    #[command()]
    ValidateTier(ValidateTierArgs),
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("REPO_STEWARD_LOG"))
        .init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Scan(args) => commands::scan_cmd::execute(args).await,
        Commands::Sync(args) => commands::sync_cmd::execute(args).await,
        Commands::ValidateTier(args) => commands::tier_cmd::execute(args),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("Error: {e}");
            std::process::exit(1);
        }
    }
}
