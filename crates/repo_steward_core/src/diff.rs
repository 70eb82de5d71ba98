//! Desired-vs-actual branch protection diffing.
//!
//! [`compute_diff`] is pure: it compares a fully-populated current-state
//! snapshot against a sparse desired policy and produces an ordered list of
//! setting diffs. Settings the policy does not mention are never diffed
//! (partial sync), and the evaluation order is fixed so diff lists are
//! deterministic.

use std::collections::BTreeSet;

use config_manager::DesiredBranchProtection;
use serde::Serialize;
use serde_json::{json, Value};

use crate::repository::RepoInfo;

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;

/// Snapshot of the branch protection currently configured on the remote.
///
/// Every managed field is an `Option`: `None` means "not configured on the
/// remote", which is distinct from `Some(false)` or an empty list meaning
/// "explicitly disabled". The differ's add-vs-change classification depends
/// on this distinction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchProtectionSettings {
    /// Branch the snapshot describes
    pub branch: String,

    /// Required number of approving reviews
    pub required_reviews: Option<u32>,

    /// Dismiss stale reviews when new commits are pushed
    pub dismiss_stale_reviews: Option<bool>,

    /// Require review from code owners
    pub require_code_owner_reviews: Option<bool>,

    /// Required status check contexts
    pub required_status_checks: Option<Vec<String>>,

    /// Require branches to be up to date before merging
    pub require_branches_up_to_date: Option<bool>,

    /// Require signed commits
    pub require_signed_commits: Option<bool>,

    /// Whether the protection binds administrators
    pub enforce_admins: Option<bool>,
}

impl BranchProtectionSettings {
    /// Returns a snapshot for a branch with no protection configured.
    pub fn unconfigured(branch: &str) -> Self {
        Self {
            branch: branch.to_string(),
            ..Self::default()
        }
    }
}

/// Whether a diff introduces a setting or changes an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAction {
    /// The setting is currently unset on the remote
    Add,
    /// The setting is set to a different value
    Change,
}

impl std::fmt::Display for DiffAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffAction::Add => f.write_str("add"),
            DiffAction::Change => f.write_str("change"),
        }
    }
}

/// One setting that differs between current and desired state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingDiff {
    /// Setting name (policy-file spelling)
    pub setting: String,

    /// Current remote value (`null` when unset)
    pub current: Value,

    /// Desired value from the policy
    pub desired: Value,

    /// Add or change
    pub action: DiffAction,
}

/// Result of diffing one `(repo, branch)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncDiffResult {
    /// Repository the diff applies to
    pub repo: RepoInfo,

    /// Branch the diff applies to
    pub branch: String,

    /// Setting diffs, in fixed evaluation order
    pub diffs: Vec<SettingDiff>,

    /// True iff `diffs` is non-empty
    pub has_changes: bool,

    /// Identity of the existing active branch-protection ruleset, if any.
    ///
    /// Governs create-vs-update dispatch in the applier; this is the only
    /// remote identity the reconciler tracks.
    pub current_ruleset_id: Option<u64>,
}

/// Compares current branch protection against the desired policy.
///
/// Only settings explicitly present in `desired` produce diffs. Scalar
/// settings diff on inequality; `require_status_checks` compares as a set,
/// ignoring order and duplicates. Pure and side-effect-free.
pub fn compute_diff(
    repo: &RepoInfo,
    current: &BranchProtectionSettings,
    desired: &DesiredBranchProtection,
    current_ruleset_id: Option<u64>,
) -> SyncDiffResult {
    let mut diffs = Vec::new();

    // Fixed evaluation order keeps diff lists deterministic.
    diff_scalar(
        &mut diffs,
        "required_reviews",
        current.required_reviews,
        desired.required_reviews,
    );
    diff_scalar(
        &mut diffs,
        "dismiss_stale_reviews",
        current.dismiss_stale_reviews,
        desired.dismiss_stale_reviews,
    );
    diff_scalar(
        &mut diffs,
        "require_code_owner_reviews",
        current.require_code_owner_reviews,
        desired.require_code_owner_reviews,
    );
    diff_status_checks(&mut diffs, current, desired);
    diff_scalar(
        &mut diffs,
        "require_branches_up_to_date",
        current.require_branches_up_to_date,
        desired.require_branches_up_to_date,
    );
    diff_scalar(
        &mut diffs,
        "require_signed_commits",
        current.require_signed_commits,
        desired.require_signed_commits,
    );
    diff_scalar(
        &mut diffs,
        "enforce_admins",
        current.enforce_admins,
        desired.enforce_admins,
    );

    SyncDiffResult {
        repo: repo.clone(),
        branch: desired.branch.clone(),
        has_changes: !diffs.is_empty(),
        diffs,
        current_ruleset_id,
    }
}

/// Diffs one scalar setting, skipping it entirely when unmanaged.
fn diff_scalar<T>(diffs: &mut Vec<SettingDiff>, setting: &str, current: Option<T>, desired: Option<T>)
where
    T: PartialEq + Serialize + Copy,
{
    let Some(desired) = desired else {
        return;
    };
    if current == Some(desired) {
        return;
    }
    let action = if current.is_none() {
        DiffAction::Add
    } else {
        DiffAction::Change
    };
    diffs.push(SettingDiff {
        setting: setting.to_string(),
        current: json!(current),
        desired: json!(desired),
        action,
    });
}

/// Diffs the status-check contexts as a set, ignoring order and duplicates.
fn diff_status_checks(
    diffs: &mut Vec<SettingDiff>,
    current: &BranchProtectionSettings,
    desired: &DesiredBranchProtection,
) {
    let Some(desired_checks) = &desired.require_status_checks else {
        return;
    };

    let current_set: BTreeSet<&str> = current
        .required_status_checks
        .iter()
        .flatten()
        .map(String::as_str)
        .collect();
    let desired_set: BTreeSet<&str> = desired_checks.iter().map(String::as_str).collect();
    if current_set == desired_set {
        return;
    }

    // The recorded current value is the raw remote array, not the set.
    let current_raw = current.required_status_checks.clone().unwrap_or_default();
    let action = if current_raw.is_empty() {
        DiffAction::Add
    } else {
        DiffAction::Change
    };
    diffs.push(SettingDiff {
        setting: "require_status_checks".to_string(),
        current: json!(current_raw),
        desired: json!(desired_checks),
        action,
    });
}
