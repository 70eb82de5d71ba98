//! Tier ruleset validation command.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use colored::Colorize;
use repo_steward_core::validate_tier_ruleset;
use tracing::instrument;

use crate::commands::print_check;
use crate::errors::Error;

/// Arguments for the validate-tier command.
#[derive(Args, Debug)]
pub struct ValidateTierArgs {
    /// Path to the policy file
    #[arg(short, long, default_value = "repo-steward.toml")]
    pub config: PathBuf,

    /// Path to the tier metadata file
    #[arg(short, long, default_value = "repo-metadata.yaml")]
    pub metadata: PathBuf,
}

/// Executes the validate-tier command. Returns whether the check passed.
#[instrument(skip(args))]
pub fn execute(args: &ValidateTierArgs) -> Result<bool, Error> {
    let start = Instant::now();
    let result = validate_tier_ruleset(&args.config, &args.metadata);

    println!(
        "tier: {} (from {})",
        result.tier.to_string().bold(),
        result.tier_source
    );
    println!("expected pattern: {}", result.expected_pattern);
    if result.rulesets.is_empty() {
        println!("no rulesets declared");
    } else {
        println!(
            "declared: [{}], matched: [{}]",
            result.rulesets.join(", "),
            result.matched_rulesets.join(", ")
        );
    }

    let check = result.into_check_result(start.elapsed());
    print_check(&check);
    Ok(check.passed)
}
