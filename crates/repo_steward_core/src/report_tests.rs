use super::*;

#[test]
fn test_check_result_passes_without_violations() {
    let result = CheckResult::from_violations("branch-protection", "protection.branch", vec![], Duration::ZERO);

    assert!(result.passed);
    assert!(!result.skipped);
    assert!(result.violations.is_empty());
}

#[test]
fn test_check_result_fails_with_error_violation() {
    let violations = vec![Violation::error(
        "protection.branch",
        "required_reviews: expected 2, found 1".to_string(),
    )];

    let result =
        CheckResult::from_violations("branch-protection", "protection.branch", violations, Duration::ZERO);

    assert!(!result.passed);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].severity, Severity::Error);
    assert_eq!(result.violations[0].tool, "repo-steward");
}

#[test]
fn test_check_result_passes_with_only_warnings() {
    let violations = vec![Violation {
        rule: "repository.files".to_string(),
        tool: "repo-steward".to_string(),
        file: Some("CONTRIBUTING.md".to_string()),
        line: None,
        message: "recommended file is missing".to_string(),
        severity: Severity::Warning,
    }];

    let result = CheckResult::from_violations("repository-files", "repository.files", violations, Duration::ZERO);

    assert!(result.passed);
}

#[test]
fn test_skipped_check_counts_as_passed() {
    let result = CheckResult::skipped("branch-protection", "protection.branch", "gh CLI is not available");

    assert!(result.passed);
    assert!(result.skipped);
    assert_eq!(result.skip_reason.as_deref(), Some("gh CLI is not available"));
    assert!(result.violations.is_empty());
}
