//! Tier-based ruleset name validation.
//!
//! A repository's tier (`production`, `internal`, `prototype`) determines
//! which named rulesets it is expected to inherit: every tier expects at
//! least one declared ruleset whose name carries the `-{tier}` suffix.
//! This check is entirely local; it reads the policy file and the tier
//! metadata and never touches the network.

use std::path::Path;
use std::time::Duration;

use config_manager::{PolicyConfig, Tier, TierSource};
use serde::Serialize;
use tracing::warn;

use crate::report::{CheckResult, Violation};

#[cfg(test)]
#[path = "tier_tests.rs"]
mod tests;

/// Result of validating a repository's declared rulesets against its tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierValidationResult {
    /// Whether the declaration satisfies the tier
    pub valid: bool,

    /// The tier the repository declared (or defaulted to)
    pub tier: Tier,

    /// Where the tier value came from
    pub tier_source: TierSource,

    /// Rulesets declared in the policy's `[extends]` section
    pub rulesets: Vec<String>,

    /// Pattern a matching ruleset name must satisfy
    pub expected_pattern: String,

    /// Declared rulesets whose names match the tier suffix
    pub matched_rulesets: Vec<String>,

    /// Failure description when invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TierValidationResult {
    /// Converts the result into the common check reporting contract.
    pub fn into_check_result(self, duration: Duration) -> CheckResult {
        let violations = match &self.error {
            Some(error) => vec![Violation::error("extends.tier", error.clone())],
            None => Vec::new(),
        };
        CheckResult::from_violations("tier-ruleset", "extends.tier", violations, duration)
    }
}

/// Validates that locally-declared ruleset names match the repository tier.
///
/// Reads the policy file's `[extends].rulesets` list and the tier from
/// `repo-metadata.yaml`. Both inputs degrade rather than fail: an unloadable
/// policy file contributes an empty ruleset list, and any problem with the
/// tier metadata falls back to the default tier.
///
/// Matching is by exact suffix: a ruleset matches tier `production` iff its
/// name ends with `-production`, so `base-production` matches and
/// `production-extra` does not. An empty ruleset list is trivially valid
/// (nothing was declared to check).
pub fn validate_tier_ruleset(policy_path: &Path, metadata_path: &Path) -> TierValidationResult {
    let rulesets = match PolicyConfig::load(policy_path) {
        Ok(policy) => policy.declared_rulesets().to_vec(),
        Err(e) => {
            warn!(path = %policy_path.display(), error = %e, "Cannot read policy file, no rulesets declared");
            Vec::new()
        }
    };
    let (tier, tier_source) = Tier::load(metadata_path);

    let suffix = format!("-{}", tier);
    let expected_pattern = format!("*-{}", tier);
    let matched_rulesets: Vec<String> = rulesets
        .iter()
        .filter(|name| name.ends_with(&suffix))
        .cloned()
        .collect();

    let valid = rulesets.is_empty() || !matched_rulesets.is_empty();
    let error = (!valid).then(|| {
        format!(
            "No ruleset matching pattern '{}' found",
            expected_pattern
        )
    });

    TierValidationResult {
        valid,
        tier,
        tier_source,
        rulesets,
        expected_pattern,
        matched_rulesets,
        error,
    }
}
