//! Read-only repository compliance scanning.
//!
//! The scanner orchestrates remote verification, ruleset reverse-mapping,
//! the differ (in read-only mode, where diffs become violations), and the
//! standard file checks into one compliance report. Nothing on this path
//! mutates remote state.

use std::sync::Arc;
use std::time::Instant;

use config_manager::{DesiredBranchProtection, PolicyConfig, TagProtectionConfig};
use github_client::{GitHubClient, HttpMethod, RepositoryRuleset, Rule, RulesetTarget};
use serde::Serialize;
use tracing::{info, instrument};

use crate::diff::{compute_diff, BranchProtectionSettings};
use crate::errors::{RemoteError, RemoteResult};
use crate::remote::{standard_file_checks, RemoteFetcher};
use crate::report::{CheckResult, Severity, Violation};
use crate::repository::RepoInfo;

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;

/// Summary counters for a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Names of the checks that failed
    pub failed_checks: Vec<String>,
}

/// Full result of scanning one repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    /// Repository that was scanned
    pub repo: RepoInfo,

    /// Per-area check results
    pub checks: Vec<CheckResult>,

    /// True iff every check passed
    pub passed: bool,

    /// Summary of failures
    pub summary: ScanSummary,
}

/// Read-only compliance scanner.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use github_client::GhCliClient;
/// use repo_steward_core::RepositoryScanner;
///
/// # async fn example(policy: config_manager::PolicyConfig) -> Result<(), Box<dyn std::error::Error>> {
/// let scanner = RepositoryScanner::new(Arc::new(GhCliClient::new()));
/// let result = scanner.scan_repository("myorg/myrepo", &policy).await?;
/// println!("passed: {}", result.passed);
/// # Ok(())
/// # }
/// ```
pub struct RepositoryScanner<C> {
    /// Client for GitHub API operations
    client: Arc<C>,

    /// Remote probing helper sharing the same client
    fetcher: RemoteFetcher<C>,
}

impl<C: GitHubClient> RepositoryScanner<C> {
    /// Creates a new scanner on top of the given client.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            fetcher: RemoteFetcher::new(Arc::clone(&client)),
            client,
        }
    }

    /// Scans a repository against the declared policy.
    ///
    /// # Errors
    ///
    /// Verification failures ([`RemoteError::GhUnavailable`],
    /// [`RemoteError::InvalidRepo`], [`RemoteError::RepoNotFound`],
    /// [`RemoteError::PermissionDenied`], [`RemoteError::Api`]) abort the
    /// scan as a whole: without verified access no downstream check can be
    /// trusted.
    #[instrument(skip(self, policy), fields(repo_spec = %repo_spec))]
    pub async fn scan_repository(
        &self,
        repo_spec: &str,
        policy: &PolicyConfig,
    ) -> RemoteResult<ScanResult> {
        if !self.fetcher.is_gh_available().await {
            return Err(RemoteError::GhUnavailable);
        }
        let repo = RepoInfo::parse(repo_spec)?;
        self.fetcher.verify_repo_access(&repo).await?;

        let rulesets = self.list_rulesets(&repo).await?;

        let mut checks = Vec::new();
        if let Some(desired) = &policy.protection {
            checks.push(
                self.check_branch_protection(&repo, desired, &rulesets)
                    .await?,
            );
        }
        if let Some(tags) = &policy.tag_protection {
            checks.push(self.check_tag_protection(&repo, tags, &rulesets).await?);
        }
        checks.push(self.check_standard_files(&repo).await);

        let passed = checks.iter().all(|c| c.passed);
        let failed_checks = checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.name.clone())
            .collect();
        info!(repo = %repo, passed = passed, checks = checks.len(), "Scan complete");

        Ok(ScanResult {
            repo,
            checks,
            passed,
            summary: ScanSummary { failed_checks },
        })
    }

    /// Lists the rulesets configured on the repository.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the listing fails or the response does
    /// not parse.
    pub async fn list_rulesets(&self, repo: &RepoInfo) -> RemoteResult<Vec<RepositoryRuleset>> {
        let value = self
            .client
            .request(
                HttpMethod::Get,
                &format!("repos/{}/{}/rulesets", repo.owner, repo.repo),
                None,
            )
            .await
            .map_err(|e| RemoteError::from_client(e, &repo.owner, &repo.repo))?;
        serde_json::from_value(value).map_err(|e| RemoteError::Api {
            message: format!("Unexpected rulesets response: {}", e),
        })
    }

    /// Fetches one ruleset with its rules.
    ///
    /// The LIST endpoint omits rules, so reverse-mapping always goes
    /// through this detail call.
    async fn get_ruleset(&self, repo: &RepoInfo, id: u64) -> RemoteResult<RepositoryRuleset> {
        let value = self
            .client
            .request(
                HttpMethod::Get,
                &format!("repos/{}/{}/rulesets/{}", repo.owner, repo.repo, id),
                None,
            )
            .await
            .map_err(|e| RemoteError::from_client(e, &repo.owner, &repo.repo))?;
        serde_json::from_value(value).map_err(|e| RemoteError::Api {
            message: format!("Unexpected ruleset response: {}", e),
        })
    }

    /// Reads the current branch protection snapshot for one branch.
    ///
    /// Returns the reverse-mapped settings and the identity of the active
    /// branch ruleset covering the branch, or an unconfigured snapshot with
    /// no identity when none exists.
    pub async fn fetch_branch_protection(
        &self,
        repo: &RepoInfo,
        branch: &str,
    ) -> RemoteResult<(BranchProtectionSettings, Option<u64>)> {
        let rulesets = self.list_rulesets(repo).await?;
        self.branch_snapshot(repo, branch, &rulesets).await
    }

    async fn branch_snapshot(
        &self,
        repo: &RepoInfo,
        branch: &str,
        rulesets: &[RepositoryRuleset],
    ) -> RemoteResult<(BranchProtectionSettings, Option<u64>)> {
        let ref_name = format!("refs/heads/{}", branch);
        let candidate = rulesets
            .iter()
            .find(|r| r.is_active() && r.target == RulesetTarget::Branch && r.includes_ref(&ref_name));

        let Some(id) = candidate.and_then(|r| r.id) else {
            return Ok((BranchProtectionSettings::unconfigured(branch), None));
        };
        let detail = self.get_ruleset(repo, id).await?;
        Ok((settings_from_ruleset(branch, &detail), Some(id)))
    }

    async fn check_branch_protection(
        &self,
        repo: &RepoInfo,
        desired: &DesiredBranchProtection,
        rulesets: &[RepositoryRuleset],
    ) -> RemoteResult<CheckResult> {
        let start = Instant::now();
        let (current, ruleset_id) = self.branch_snapshot(repo, &desired.branch, rulesets).await?;

        // Read-only mode: diffs become violations, nothing is applied.
        let diff = compute_diff(repo, &current, desired, ruleset_id);
        let violations = diff
            .diffs
            .iter()
            .map(|d| {
                Violation::error(
                    "protection.branch",
                    format!(
                        "{}: expected {}, found {} ({})",
                        d.setting, d.desired, d.current, d.action
                    ),
                )
            })
            .collect();

        Ok(CheckResult::from_violations(
            "branch-protection",
            "protection.branch",
            violations,
            start.elapsed(),
        ))
    }

    async fn check_tag_protection(
        &self,
        repo: &RepoInfo,
        config: &TagProtectionConfig,
        rulesets: &[RepositoryRuleset],
    ) -> RemoteResult<CheckResult> {
        let start = Instant::now();
        if config.patterns.is_empty() {
            return Ok(CheckResult::from_violations(
                "tag-protection",
                "protection.tags",
                Vec::new(),
                start.elapsed(),
            ));
        }

        let active_tag: Vec<&RepositoryRuleset> = rulesets
            .iter()
            .filter(|r| r.is_active() && r.target == RulesetTarget::Tag)
            .collect();

        let mut violations = Vec::new();
        let mut matched_ids: Vec<u64> = Vec::new();
        for pattern in &config.patterns {
            let ref_name = format!("refs/tags/{}", pattern);
            let covering: Vec<&RepositoryRuleset> = active_tag
                .iter()
                .copied()
                .filter(|r| r.includes_ref(&ref_name))
                .collect();
            if covering.is_empty() {
                violations.push(Violation::error(
                    "protection.tags",
                    format!("tag pattern '{}' is not covered by any active tag ruleset", pattern),
                ));
                continue;
            }
            for ruleset in covering {
                if let Some(id) = ruleset.id {
                    if !matched_ids.contains(&id) {
                        matched_ids.push(id);
                    }
                }
            }
        }

        if !matched_ids.is_empty() {
            // Rules live only in the detail response.
            let mut rules = Vec::new();
            for id in matched_ids {
                rules.extend(self.get_ruleset(repo, id).await?.rules);
            }
            if config.prevent_deletion && !rules.contains(&Rule::Deletion) {
                violations.push(Violation::error(
                    "protection.tags",
                    "protected tags can be deleted: no deletion rule is active".to_string(),
                ));
            }
            if config.prevent_update && !rules.contains(&Rule::Update) {
                violations.push(Violation::error(
                    "protection.tags",
                    "protected tags can be moved: no update rule is active".to_string(),
                ));
            }
        }

        Ok(CheckResult::from_violations(
            "tag-protection",
            "protection.tags",
            violations,
            start.elapsed(),
        ))
    }

    async fn check_standard_files(&self, repo: &RepoInfo) -> CheckResult {
        let start = Instant::now();
        let configs = standard_file_checks();
        let results = self.fetcher.check_remote_files(repo, &configs).await;

        let violations = results
            .iter()
            .filter(|r| r.config.required && !r.exists)
            .map(|r| Violation {
                rule: "repository.files".to_string(),
                tool: "repo-steward".to_string(),
                file: Some(r.config.path.clone()),
                line: None,
                message: format!(
                    "missing required file {} (checked: {})",
                    r.config.description,
                    r.checked_paths.join(", ")
                ),
                severity: Severity::Error,
            })
            .collect();

        CheckResult::from_violations(
            "repository-files",
            "repository.files",
            violations,
            start.elapsed(),
        )
    }
}

/// Reverse-maps a ruleset's rules into a branch protection snapshot.
///
/// Absence of a rule type leaves the corresponding fields `None` ("not
/// configured"), which the differ distinguishes from explicit `false`.
/// `enforce_admins` reflects the bypass list: an empty list means the
/// ruleset binds administrators.
pub fn settings_from_ruleset(branch: &str, ruleset: &RepositoryRuleset) -> BranchProtectionSettings {
    let mut settings = BranchProtectionSettings::unconfigured(branch);
    settings.enforce_admins = Some(ruleset.bypass_actors.is_empty());

    for rule in &ruleset.rules {
        match rule {
            Rule::PullRequest { parameters } => {
                settings.required_reviews = parameters.required_approving_review_count;
                settings.dismiss_stale_reviews = parameters.dismiss_stale_reviews_on_push;
                settings.require_code_owner_reviews = parameters.require_code_owner_review;
            }
            Rule::RequiredStatusChecks { parameters } => {
                settings.required_status_checks = Some(
                    parameters
                        .required_status_checks
                        .iter()
                        .map(|c| c.context.clone())
                        .collect(),
                );
                // The rule being present means the strict policy is
                // configured; GitHub defaults it to false when omitted.
                settings.require_branches_up_to_date = Some(
                    parameters
                        .strict_required_status_checks_policy
                        .unwrap_or(false),
                );
            }
            Rule::RequiredSignatures => {
                settings.require_signed_commits = Some(true);
            }
            _ => {}
        }
    }
    settings
}
