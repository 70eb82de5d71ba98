//! Read-only repository scanning command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use colored::Colorize;
use config_manager::PolicyConfig;
use github_client::GhCliClient;
use repo_steward_core::{CheckResult, RemoteError, RepositoryScanner};
use tracing::instrument;

use crate::commands::print_check;
use crate::errors::Error;

/// Arguments for the scan command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Repository to scan, as owner/repo
    pub repo: String,

    /// Path to the policy file
    #[arg(short, long, default_value = "repo-steward.toml")]
    pub config: PathBuf,
}

/// Executes the scan command.
///
/// Returns whether the scan passed. A missing gh CLI is reported as a
/// skipped check rather than a failure: evaluation was impossible, which is
/// not the same as the policy being unmet.
#[instrument(skip(args), fields(repo = %args.repo))]
pub async fn execute(args: &ScanArgs) -> Result<bool, Error> {
    let policy = PolicyConfig::load(&args.config)?;
    let scanner = RepositoryScanner::new(Arc::new(GhCliClient::new()));

    match scanner.scan_repository(&args.repo, &policy).await {
        Ok(result) => {
            for check in &result.checks {
                print_check(check);
            }
            if result.passed {
                println!("\n{} {}", result.repo, "compliant".green());
            } else {
                println!(
                    "\n{} {} ({})",
                    result.repo,
                    "not compliant".red(),
                    result.summary.failed_checks.join(", ")
                );
            }
            Ok(result.passed)
        }
        Err(RemoteError::GhUnavailable) => {
            let check = CheckResult::skipped(
                "repository-scan",
                "repository",
                "gh CLI is not available",
            );
            print_check(&check);
            Ok(true)
        }
        Err(e) => Err(Error::Remote(e)),
    }
}
