//! Declarative protection policy settings.
//!
//! Defines the TOML-friendly policy file that declares the desired branch
//! and tag protection for a repository, plus the `[extends]` section naming
//! the rulesets a repository claims to inherit.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ConfigurationError, ConfigurationResult};

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;

/// Root of the policy file.
///
/// Every section is optional; an absent section means the corresponding
/// checks have nothing to enforce.
///
/// # Examples
///
/// ```toml
/// [protection]
/// branch = "main"
/// required_reviews = 2
/// require_status_checks = ["ci/build", "ci/test"]
/// require_branches_up_to_date = true
///
/// [tag_protection]
/// patterns = ["v*"]
/// prevent_deletion = true
/// prevent_update = true
///
/// [extends]
/// rulesets = ["base-production"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Desired branch protection, if managed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection: Option<DesiredBranchProtection>,

    /// Desired tag protection, if managed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_protection: Option<TagProtectionConfig>,

    /// Inherited ruleset declarations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<ExtendsConfig>,
}

impl PolicyConfig {
    /// Loads a policy file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::FileRead`] if the file cannot be read
    /// and [`ConfigurationError::PolicyParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> ConfigurationResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigurationError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PolicyConfig =
            toml::from_str(&text).map_err(|source| ConfigurationError::PolicyParse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "Loaded policy file");
        Ok(config)
    }

    /// Returns the rulesets declared in the `[extends]` section.
    pub fn declared_rulesets(&self) -> &[String] {
        self.extends
            .as_ref()
            .map(|e| e.rulesets.as_slice())
            .unwrap_or(&[])
    }
}

/// Desired branch protection (partial policy).
///
/// Every managed setting is optional: an absent setting means "do not
/// manage this setting", which is distinct from explicitly declaring it
/// `false` or empty. The differ only ever diffs settings that are present
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesiredBranchProtection {
    /// Branch the policy applies to
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Required number of approving reviews
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_reviews: Option<u32>,

    /// Dismiss stale reviews when new commits are pushed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismiss_stale_reviews: Option<bool>,

    /// Require review from code owners
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_code_owner_reviews: Option<bool>,

    /// Required status check contexts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_status_checks: Option<Vec<String>>,

    /// Require branches to be up to date before merging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_branches_up_to_date: Option<bool>,

    /// Require signed commits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_signed_commits: Option<bool>,

    /// Enforce the policy for administrators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce_admins: Option<bool>,
}

impl Default for DesiredBranchProtection {
    fn default() -> Self {
        Self {
            branch: default_branch(),
            required_reviews: None,
            dismiss_stale_reviews: None,
            require_code_owner_reviews: None,
            require_status_checks: None,
            require_branches_up_to_date: None,
            require_signed_commits: None,
            enforce_admins: None,
        }
    }
}

impl DesiredBranchProtection {
    /// Returns true when any pull-request review setting is managed.
    pub fn manages_reviews(&self) -> bool {
        self.required_reviews.is_some()
            || self.dismiss_stale_reviews.is_some()
            || self.require_code_owner_reviews.is_some()
    }
}

fn default_branch() -> String {
    "main".to_string()
}

/// Policy for a tag-protection ruleset.
///
/// Structurally parallel to branch protection but targeting `refs/tags/*`
/// patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagProtectionConfig {
    /// Tag name patterns to protect (e.g. `v*`)
    pub patterns: Vec<String>,

    /// Prevent deletion of matching tags
    #[serde(default)]
    pub prevent_deletion: bool,

    /// Prevent updates to matching tags
    #[serde(default)]
    pub prevent_update: bool,
}

/// Inherited ruleset declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendsConfig {
    /// Names of rulesets this repository declares it inherits
    #[serde(default)]
    pub rulesets: Vec<String>,
}
