//! Protection policy sync command.
//!
//! Computes the diff between declared and actual protection and, unless
//! `--dry-run` is given, pushes the declared policy onto GitHub. Each
//! invocation reconciles exactly one `(repo, branch)` pair; racing syncs
//! are assumed to be serialized externally (CI concurrency control).

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use colored::Colorize;
use config_manager::PolicyConfig;
use github_client::GhCliClient;
use repo_steward_core::{
    compute_diff, find_tag_ruleset_id, ApplyOutcome, Applier, RemoteError, RemoteFetcher,
    RepoInfo, RepositoryScanner, SyncDiffResult,
};
use tracing::{info, instrument};

use crate::errors::Error;

/// Arguments for the sync command.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Repository to sync, as owner/repo
    pub repo: String,

    /// Path to the policy file
    #[arg(short, long, default_value = "repo-steward.toml")]
    pub config: PathBuf,

    /// Compute and print the diff without applying anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Executes the sync command. Returns whether every apply succeeded.
#[instrument(skip(args), fields(repo = %args.repo, dry_run = args.dry_run))]
pub async fn execute(args: &SyncArgs) -> Result<bool, Error> {
    let policy = PolicyConfig::load(&args.config)?;

    let client = Arc::new(GhCliClient::new());
    let fetcher = RemoteFetcher::new(Arc::clone(&client));
    if !fetcher.is_gh_available().await {
        return Err(Error::Remote(RemoteError::GhUnavailable));
    }
    let repo = RepoInfo::parse(&args.repo)?;
    fetcher.verify_repo_access(&repo).await?;

    let scanner = RepositoryScanner::new(Arc::clone(&client));
    let applier = Applier::new(Arc::clone(&client));
    let mut success = true;

    if let Some(desired) = &policy.protection {
        let (current, ruleset_id) = scanner
            .fetch_branch_protection(&repo, &desired.branch)
            .await?;
        let diff = compute_diff(&repo, &current, desired, ruleset_id);
        print_diff(&diff);

        if !args.dry_run && diff.has_changes {
            let outcome = applier
                .apply_branch_protection(&repo, desired, &diff)
                .await?;
            print_outcome("branch protection", &outcome);
            success &= outcome.success;
        }
    } else {
        info!("Policy declares no [protection] section, skipping branch sync");
    }

    if let Some(tags) = &policy.tag_protection {
        let rulesets = scanner.list_rulesets(&repo).await?;
        let tag_ruleset_id = find_tag_ruleset_id(&rulesets);
        if args.dry_run {
            let verb = if tag_ruleset_id.is_none() {
                "create"
            } else {
                "update"
            };
            println!(
                "would {} tag ruleset for patterns [{}]",
                verb,
                tags.patterns.join(", ")
            );
        } else {
            let outcome = applier
                .apply_tag_protection(&repo, tags, tag_ruleset_id)
                .await?;
            print_outcome("tag protection", &outcome);
            success &= outcome.success;
        }
    }

    Ok(success)
}

fn print_diff(diff: &SyncDiffResult) {
    if !diff.has_changes {
        println!(
            "{} branch '{}' already matches the declared policy",
            "ok".green().bold(),
            diff.branch
        );
        return;
    }
    println!(
        "{} setting(s) out of sync on branch '{}':",
        diff.diffs.len(),
        diff.branch
    );
    for d in &diff.diffs {
        println!(
            "  {} {}: {} -> {}",
            format!("[{}]", d.action).cyan(),
            d.setting,
            d.current,
            d.desired
        );
    }
}

fn print_outcome(what: &str, outcome: &ApplyOutcome) {
    if outcome.success {
        println!(
            "{} applied {} ({} setting(s))",
            "ok".green().bold(),
            what,
            outcome.applied.len()
        );
    } else {
        println!("{} failed to apply {}:", "error".red().bold(), what);
        for failed in &outcome.failed {
            println!("  {}: {}", failed.diff.setting, failed.error);
        }
    }
}
