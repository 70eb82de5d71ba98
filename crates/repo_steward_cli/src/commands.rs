//! Command modules for the RepoSteward CLI.
//!
//! Each submodule handles one subcommand:
//!
//! - `scan_cmd`: read-only compliance scanning
//! - `sync_cmd`: diffing and applying protection policy
//! - `tier_cmd`: local tier/ruleset-name validation

pub mod scan_cmd;
pub mod sync_cmd;
pub mod tier_cmd;

use colored::Colorize;
use repo_steward_core::CheckResult;

/// Prints one check result with its violations.
pub(crate) fn print_check(check: &CheckResult) {
    let status = if check.skipped {
        "SKIP".yellow().bold()
    } else if check.passed {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    };
    println!("{} {}", status, check.name);

    if let Some(reason) = &check.skip_reason {
        println!("       {}", reason.dimmed());
    }
    for violation in &check.violations {
        println!("       {} {}", "-".dimmed(), violation.message);
    }
}
