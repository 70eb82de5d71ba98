//! Core reconciliation and scanning logic for RepoSteward.
//!
//! This crate implements the only part of the checker that talks to a
//! remote, stateful system: desired-vs-actual diffing of branch protection,
//! idempotent apply of branch and tag rulesets, remote repository
//! verification, read-only compliance scanning, and tier-based ruleset
//! validation. Everything runs against the [`github_client::GitHubClient`]
//! capability trait so the logic stays transport-agnostic.

mod errors;

// Re-export error types for public API
pub use errors::{ApplyError, RemoteError, RemoteResult};

/// Repository identity (owner/repo parsing)
pub mod repository;

/// Common check reporting contract
pub mod report;

/// Desired-vs-actual branch protection diffing
pub mod diff;

/// Ruleset apply (create-or-update) operations
pub mod apply;

/// Remote verification and file-existence probing
pub mod remote;

/// Read-only repository compliance scanning
pub mod scan;

/// Tier-based ruleset name validation
pub mod tier;

// Re-export commonly used types
pub use apply::{
    build_branch_ruleset, build_tag_ruleset, find_tag_ruleset_id, ApplyOutcome, Applier,
    FailedDiff, RULESET_NAME_BRANCH, RULESET_NAME_TAG,
};
pub use diff::{compute_diff, BranchProtectionSettings, DiffAction, SettingDiff, SyncDiffResult};
pub use remote::{standard_file_checks, RemoteFetcher, RemoteFileCheck, RemoteFileConfig};
pub use report::{CheckResult, Severity, Violation};
pub use repository::RepoInfo;
pub use scan::{RepositoryScanner, ScanResult, ScanSummary};
pub use tier::{validate_tier_ruleset, TierValidationResult};

#[cfg(test)]
pub(crate) mod test_support;
