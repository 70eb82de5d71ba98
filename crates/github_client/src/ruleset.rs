//! Repository ruleset domain types.
//!
//! This module contains types representing GitHub repository rulesets, the
//! protection primitive that enforces governance rules (reviews, status
//! checks, signatures, deletion/update restrictions) against refs matching a
//! pattern.
//!
//! See: https://docs.github.com/en/rest/repos/rules

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "ruleset_tests.rs"]
mod tests;

/// Represents a repository ruleset.
///
/// Serialization matches the GitHub REST wire format, so this type is used
/// both for building create/update request bodies and for reading rulesets
/// back from the API.
///
/// # Examples
///
/// ```rust
/// use github_client::{RepositoryRuleset, RulesetTarget, RulesetEnforcement};
///
/// let ruleset = RepositoryRuleset {
///     id: None,
///     name: "Branch Protection".to_string(),
///     target: RulesetTarget::Branch,
///     enforcement: RulesetEnforcement::Active,
///     bypass_actors: vec![],
///     conditions: None,
///     rules: vec![],
/// };
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RepositoryRuleset {
    /// Ruleset ID (None for creation, Some when read back or updated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Ruleset name
    pub name: String,

    /// Target type (branch or tag)
    pub target: RulesetTarget,

    /// Enforcement level
    pub enforcement: RulesetEnforcement,

    /// Actors who can bypass this ruleset
    ///
    /// An empty list means the ruleset binds everyone, administrators
    /// included.
    #[serde(default)]
    pub bypass_actors: Vec<serde_json::Value>,

    /// Conditions for when this ruleset applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<RulesetConditions>,

    /// Rules in this ruleset
    ///
    /// Note: GitHub's LIST rulesets endpoint does not include rules in the
    /// response. Fetch `GET /repos/{owner}/{repo}/rulesets/{id}` for the full
    /// ruleset before inspecting rules.
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RepositoryRuleset {
    /// Returns true when this ruleset is actively enforced.
    pub fn is_active(&self) -> bool {
        self.enforcement == RulesetEnforcement::Active
    }

    /// Returns true when this ruleset's conditions include the given ref.
    ///
    /// A ruleset without conditions matches nothing here; the API always
    /// attaches conditions to branch and tag rulesets it returns.
    pub fn includes_ref(&self, ref_name: &str) -> bool {
        self.conditions
            .as_ref()
            .map(|c| c.ref_name.include.iter().any(|p| p == ref_name))
            .unwrap_or(false)
    }
}

/// Target type for a ruleset.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RulesetTarget {
    /// Ruleset applies to branches
    Branch,
    /// Ruleset applies to tags
    Tag,
    /// Ruleset applies to pushes
    Push,
}

/// Enforcement level for a ruleset.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RulesetEnforcement {
    /// Ruleset is disabled
    Disabled,
    /// Ruleset is active and enforced
    Active,
    /// Ruleset is in evaluation mode (logs only, doesn't block)
    Evaluate,
}

/// Conditions for when a ruleset applies.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RulesetConditions {
    /// Reference name patterns
    pub ref_name: RefNameCondition,
}

/// Reference name condition.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefNameCondition {
    /// Patterns to include
    pub include: Vec<String>,

    /// Patterns to exclude
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// A rule within a ruleset.
///
/// Rule types this tool does not manage deserialize into [`Rule::Unknown`]
/// rather than failing, since repositories routinely carry rules (merge
/// queues, commit message patterns) configured outside the declared policy.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// Prevent creation of matching refs
    Creation,

    /// Prevent updates to matching refs
    Update,

    /// Prevent deletion of matching refs
    Deletion,

    /// Require linear history (no merge commits)
    RequiredLinearHistory,

    /// Require signed commits
    RequiredSignatures,

    /// Pull request requirements
    PullRequest {
        /// Pull request parameters
        parameters: PullRequestParameters,
    },

    /// Required status checks
    RequiredStatusChecks {
        /// Required status check parameters
        parameters: RequiredStatusChecksParameters,
    },

    /// Non-fast-forward updates
    NonFastForward,

    /// Any rule type this tool does not manage
    #[serde(other)]
    Unknown,
}

/// Parameters for pull request rules.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestParameters {
    /// Required approving review count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_approving_review_count: Option<u32>,

    /// Dismiss stale reviews when new commits are pushed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismiss_stale_reviews_on_push: Option<bool>,

    /// Require code owner review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_code_owner_review: Option<bool>,
}

/// Parameters for required status checks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequiredStatusChecksParameters {
    /// Required status checks
    pub required_status_checks: Vec<StatusCheck>,

    /// Require branches to be up to date before merging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_required_status_checks_policy: Option<bool>,
}

/// A required status check.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCheck {
    /// Status check context
    pub context: String,

    /// Integration ID (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<u64>,
}
