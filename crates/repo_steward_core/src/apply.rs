//! Ruleset apply (create-or-update) operations.
//!
//! The GitHub rulesets API replaces or creates whole ruleset objects; there
//! is no partial-field PATCH. The applier therefore always submits the full
//! rule set built from the desired policy, never only the diffed fields,
//! and a single call either applies every requested diff or none of them.

use std::sync::Arc;

use config_manager::{DesiredBranchProtection, TagProtectionConfig};
use github_client::{
    GitHubClient, HttpMethod, PullRequestParameters, RefNameCondition, RepositoryRuleset,
    RequiredStatusChecksParameters, Rule, RulesetConditions, RulesetEnforcement, RulesetTarget,
    StatusCheck,
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::diff::{DiffAction, SettingDiff, SyncDiffResult};
use crate::errors::ApplyError;
use crate::repository::RepoInfo;

#[cfg(test)]
#[path = "apply_tests.rs"]
mod tests;

/// Name of the managed branch-protection ruleset.
pub const RULESET_NAME_BRANCH: &str = "Branch Protection";

/// Name of the managed tag-protection ruleset.
pub const RULESET_NAME_TAG: &str = "Tag Protection";

/// A diff that could not be applied, with the failure text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedDiff {
    /// The diff that was requested
    pub diff: SettingDiff,

    /// Error text from the failed call
    pub error: String,
}

/// Recoverable outcome of an apply operation.
///
/// Fatal conditions (permission rejection) never appear here; they
/// propagate as [`ApplyError`] instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyOutcome {
    /// Whether every requested diff was applied
    pub success: bool,

    /// Diffs that were applied
    pub applied: Vec<SettingDiff>,

    /// Diffs that failed
    pub failed: Vec<FailedDiff>,
}

impl ApplyOutcome {
    fn clean() -> Self {
        Self {
            success: true,
            applied: Vec::new(),
            failed: Vec::new(),
        }
    }
}

/// Pushes declared protection policy onto GitHub.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use github_client::GhCliClient;
/// use repo_steward_core::{compute_diff, Applier, BranchProtectionSettings, RepoInfo};
///
/// # async fn example(desired: config_manager::DesiredBranchProtection) -> Result<(), Box<dyn std::error::Error>> {
/// let repo = RepoInfo::parse("myorg/myrepo")?;
/// let current = BranchProtectionSettings::unconfigured("main");
/// let diff = compute_diff(&repo, &current, &desired, None);
///
/// let applier = Applier::new(Arc::new(GhCliClient::new()));
/// let outcome = applier.apply_branch_protection(&repo, &desired, &diff).await?;
/// println!("applied {} settings", outcome.applied.len());
/// # Ok(())
/// # }
/// ```
pub struct Applier<C> {
    /// Client for GitHub API operations
    client: Arc<C>,
}

impl<C: GitHubClient> Applier<C> {
    /// Creates a new applier on top of the given client.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Applies the desired branch protection for one `(repo, branch)` pair.
    ///
    /// When the diff has no changes this performs no network call at all
    /// and reports clean success: re-running a sync with nothing to change
    /// never mutates remote state.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::PermissionDenied`] when GitHub rejects the
    /// write with HTTP 403. Every other failure is recoverable and lands in
    /// the outcome's `failed` list.
    pub async fn apply_branch_protection(
        &self,
        repo: &RepoInfo,
        desired: &DesiredBranchProtection,
        diff: &SyncDiffResult,
    ) -> Result<ApplyOutcome, ApplyError> {
        if !diff.has_changes {
            info!(repo = %repo, branch = %diff.branch, "Branch protection already in sync");
            return Ok(ApplyOutcome::clean());
        }

        let ruleset = build_branch_ruleset(&diff.branch, desired);
        self.submit_ruleset(repo, &ruleset, diff.current_ruleset_id, &diff.diffs)
            .await
    }

    /// Applies the declared tag protection.
    ///
    /// Same create-or-update shape as branch protection; the outcome's diff
    /// list carries a single entry describing the tag ruleset write.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError::PermissionDenied`] on HTTP 403, like the
    /// branch path.
    pub async fn apply_tag_protection(
        &self,
        repo: &RepoInfo,
        config: &TagProtectionConfig,
        current_ruleset_id: Option<u64>,
    ) -> Result<ApplyOutcome, ApplyError> {
        let ruleset = build_tag_ruleset(config);
        let diffs = vec![SettingDiff {
            setting: "tag_protection".to_string(),
            current: json!(current_ruleset_id),
            desired: json!(config),
            action: if current_ruleset_id.is_none() {
                DiffAction::Add
            } else {
                DiffAction::Change
            },
        }];
        self.submit_ruleset(repo, &ruleset, current_ruleset_id, &diffs)
            .await
    }

    /// Creates or updates one ruleset in a single atomic call.
    async fn submit_ruleset(
        &self,
        repo: &RepoInfo,
        ruleset: &RepositoryRuleset,
        current_ruleset_id: Option<u64>,
        diffs: &[SettingDiff],
    ) -> Result<ApplyOutcome, ApplyError> {
        let body = json!(ruleset);
        let result = match current_ruleset_id {
            Some(id) => {
                info!(repo = %repo, ruleset = %ruleset.name, id = id, "Updating ruleset");
                self.client
                    .request(
                        HttpMethod::Put,
                        &format!("repos/{}/{}/rulesets/{}", repo.owner, repo.repo, id),
                        Some(&body),
                    )
                    .await
            }
            None => {
                info!(repo = %repo, ruleset = %ruleset.name, "Creating ruleset");
                self.client
                    .request(
                        HttpMethod::Post,
                        &format!("repos/{}/{}/rulesets", repo.owner, repo.repo),
                        Some(&body),
                    )
                    .await
            }
        };

        match result {
            Ok(_) => Ok(ApplyOutcome {
                success: true,
                applied: diffs.to_vec(),
                failed: Vec::new(),
            }),
            Err(e) if e.http_status() == Some(403) => Err(ApplyError::PermissionDenied {
                owner: repo.owner.clone(),
                repo: repo.repo.clone(),
                message: e.to_string(),
            }),
            Err(e) => {
                let message = e.to_string();
                warn!(repo = %repo, ruleset = %ruleset.name, error = %message, "Ruleset write failed");
                // The call is atomic: every requested diff fails together.
                Ok(ApplyOutcome {
                    success: false,
                    applied: Vec::new(),
                    failed: diffs
                        .iter()
                        .cloned()
                        .map(|diff| FailedDiff {
                            diff,
                            error: message.clone(),
                        })
                        .collect(),
                })
            }
        }
    }
}

/// Builds the full branch-protection ruleset body from the desired policy.
///
/// Always built from the complete desired object, not the diff: the API
/// replaces whole rulesets, and submitting only diffed fields would
/// silently revert previously-set rules.
pub fn build_branch_ruleset(branch: &str, desired: &DesiredBranchProtection) -> RepositoryRuleset {
    let mut rules = Vec::new();

    if desired.manages_reviews() {
        rules.push(Rule::PullRequest {
            parameters: PullRequestParameters {
                required_approving_review_count: desired.required_reviews,
                dismiss_stale_reviews_on_push: desired.dismiss_stale_reviews,
                require_code_owner_review: desired.require_code_owner_reviews,
            },
        });
    }

    if let Some(checks) = &desired.require_status_checks {
        rules.push(Rule::RequiredStatusChecks {
            parameters: RequiredStatusChecksParameters {
                required_status_checks: checks
                    .iter()
                    .map(|context| StatusCheck {
                        context: context.clone(),
                        integration_id: None,
                    })
                    .collect(),
                strict_required_status_checks_policy: Some(
                    desired.require_branches_up_to_date.unwrap_or(false),
                ),
            },
        });
    }

    if desired.require_signed_commits == Some(true) {
        rules.push(Rule::RequiredSignatures);
    }

    RepositoryRuleset {
        id: None,
        name: RULESET_NAME_BRANCH.to_string(),
        target: RulesetTarget::Branch,
        enforcement: RulesetEnforcement::Active,
        // Empty bypass list: the ruleset binds everyone, admins included.
        bypass_actors: vec![],
        conditions: Some(RulesetConditions {
            ref_name: RefNameCondition {
                include: vec![format!("refs/heads/{}", branch)],
                exclude: vec![],
            },
        }),
        rules,
    }
}

/// Builds the full tag-protection ruleset body from the declared config.
pub fn build_tag_ruleset(config: &TagProtectionConfig) -> RepositoryRuleset {
    let mut rules = Vec::new();
    if config.prevent_deletion {
        rules.push(Rule::Deletion);
    }
    if config.prevent_update {
        rules.push(Rule::Update);
    }

    RepositoryRuleset {
        id: None,
        name: RULESET_NAME_TAG.to_string(),
        target: RulesetTarget::Tag,
        enforcement: RulesetEnforcement::Active,
        bypass_actors: vec![],
        conditions: Some(RulesetConditions {
            ref_name: RefNameCondition {
                include: config
                    .patterns
                    .iter()
                    .map(|p| format!("refs/tags/{}", p))
                    .collect(),
                exclude: vec![],
            },
        }),
        rules,
    }
}

/// Finds the identity of the managed tag-protection ruleset, if present.
pub fn find_tag_ruleset_id(rulesets: &[RepositoryRuleset]) -> Option<u64> {
    rulesets
        .iter()
        .find(|r| r.target == RulesetTarget::Tag && r.name == RULESET_NAME_TAG)
        .and_then(|r| r.id)
}
