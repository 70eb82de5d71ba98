//! Common check reporting contract.
//!
//! Every check in the tool, local or remote, reports through [`CheckResult`]
//! so the surrounding CLI and CI layers can render results uniformly.

use std::time::Duration;

use serde::Serialize;

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// Severity of a single violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The policy is unmet; the check fails.
    Error,
    /// Advisory only; does not fail the check by itself.
    Warning,
}

/// A single policy violation found by a check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Identifier of the violated rule (e.g. `protection.branch`)
    pub rule: String,

    /// Tool that produced the finding
    pub tool: String,

    /// File the violation concerns, when it maps to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Line number within the file, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Human-readable description
    pub message: String,

    /// Severity of the violation
    pub severity: Severity,
}

impl Violation {
    /// Creates an error-severity violation with no file context.
    pub fn error(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            tool: "repo-steward".to_string(),
            file: None,
            line: None,
            message,
            severity: Severity::Error,
        }
    }
}

/// Outcome of one check.
///
/// A check is either skipped (evaluation was impossible, with a reason),
/// failed (evaluation succeeded and found violations), or passed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// Check name (e.g. `branch-protection`)
    pub name: String,

    /// Identifier of the rule the check enforces
    pub rule: String,

    /// Whether the check passed
    pub passed: bool,

    /// Whether evaluation was skipped entirely
    pub skipped: bool,

    /// Reason for the skip, when skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,

    /// Violations found, empty when passed or skipped
    pub violations: Vec<Violation>,

    /// Wall-clock time the check took
    pub duration: Duration,
}

impl CheckResult {
    /// Creates a result from found violations.
    ///
    /// The check passes iff no violation has `Error` severity.
    pub fn from_violations(
        name: &str,
        rule: &str,
        violations: Vec<Violation>,
        duration: Duration,
    ) -> Self {
        let passed = !violations
            .iter()
            .any(|v| v.severity == Severity::Error);
        Self {
            name: name.to_string(),
            rule: rule.to_string(),
            passed,
            skipped: false,
            skip_reason: None,
            violations,
            duration,
        }
    }

    /// Creates a skipped result with the given reason.
    ///
    /// A skipped check counts as passed: evaluation was impossible, which
    /// is not the same as the policy being unmet.
    pub fn skipped(name: &str, rule: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            rule: rule.to_string(),
            passed: true,
            skipped: true,
            skip_reason: Some(reason.to_string()),
            violations: Vec::new(),
            duration: Duration::ZERO,
        }
    }
}
