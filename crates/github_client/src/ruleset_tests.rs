//! Tests for repository ruleset types.

use super::*;
use serde_json::{from_str, to_string};

// ============================================================================
// RepositoryRuleset Tests
// ============================================================================

/// Test basic ruleset deserialization from GitHub API response.
#[test]
fn test_ruleset_deserialization() {
    let json = r#"{
        "id": 123,
        "name": "Branch Protection",
        "target": "branch",
        "enforcement": "active",
        "bypass_actors": [],
        "rules": []
    }"#;

    let ruleset: RepositoryRuleset = from_str(json).expect("Failed to deserialize");

    assert_eq!(ruleset.id, Some(123));
    assert_eq!(ruleset.name, "Branch Protection");
    assert_eq!(ruleset.target, RulesetTarget::Branch);
    assert_eq!(ruleset.enforcement, RulesetEnforcement::Active);
    assert!(ruleset.bypass_actors.is_empty());
    assert!(ruleset.rules.is_empty());
}

/// Test ruleset serialization for API request.
#[test]
fn test_ruleset_serialization() {
    let ruleset = RepositoryRuleset {
        id: None, // Omit ID for creation
        name: "Tag Protection".to_string(),
        target: RulesetTarget::Tag,
        enforcement: RulesetEnforcement::Active,
        bypass_actors: vec![],
        conditions: None,
        rules: vec![Rule::Deletion],
    };

    let json = to_string(&ruleset).expect("Failed to serialize");

    // ID should not be present when None
    assert!(!json.contains("\"id\""));
    assert!(json.contains("\"Tag Protection\""));
    assert!(json.contains("\"tag\""));
    assert!(json.contains("\"active\""));
    assert!(json.contains("\"deletion\""));
}

/// Test ruleset deserialization tolerates fields this tool does not model.
#[test]
fn test_ruleset_deserialization_ignores_extra_fields() {
    let json = r#"{
        "id": 7,
        "name": "base-production",
        "target": "branch",
        "enforcement": "active",
        "node_id": "RRS_xyz",
        "source": "myorg/myrepo",
        "source_type": "Repository",
        "bypass_actors": [{"actor_id": 5, "actor_type": "RepositoryRole", "bypass_mode": "always"}]
    }"#;

    let ruleset: RepositoryRuleset = from_str(json).expect("Failed to deserialize");

    assert_eq!(ruleset.id, Some(7));
    assert_eq!(ruleset.bypass_actors.len(), 1);
    assert!(ruleset.rules.is_empty());
}

/// Test ruleset with conditions.
#[test]
fn test_ruleset_with_conditions() {
    let json = r#"{
        "id": 456,
        "name": "release-protection",
        "target": "branch",
        "enforcement": "active",
        "bypass_actors": [],
        "conditions": {
            "ref_name": {
                "include": ["refs/heads/release/*", "refs/heads/main"],
                "exclude": ["refs/heads/release/temp*"]
            }
        },
        "rules": []
    }"#;

    let ruleset: RepositoryRuleset = from_str(json).expect("Failed to deserialize");

    assert!(ruleset.includes_ref("refs/heads/main"));
    assert!(!ruleset.includes_ref("refs/heads/develop"));
    let conditions = ruleset.conditions.unwrap();
    assert_eq!(conditions.ref_name.include.len(), 2);
    assert_eq!(conditions.ref_name.exclude.len(), 1);
}

#[test]
fn test_ruleset_is_active() {
    let json = r#"{
        "name": "old-policy",
        "target": "branch",
        "enforcement": "disabled"
    }"#;

    let ruleset: RepositoryRuleset = from_str(json).expect("Failed to deserialize");

    assert!(!ruleset.is_active());
}

// ============================================================================
// Rule Tests
// ============================================================================

/// Test pull request rule serialization matches the REST wire format.
#[test]
fn test_pull_request_rule_serialization() {
    let rule = Rule::PullRequest {
        parameters: PullRequestParameters {
            required_approving_review_count: Some(2),
            dismiss_stale_reviews_on_push: Some(true),
            require_code_owner_review: None,
        },
    };

    let json = to_string(&rule).expect("Failed to serialize");

    assert!(json.contains("\"type\":\"pull_request\""));
    assert!(json.contains("\"required_approving_review_count\":2"));
    assert!(json.contains("\"dismiss_stale_reviews_on_push\":true"));
    // Unset parameters are omitted entirely
    assert!(!json.contains("require_code_owner_review"));
}

#[test]
fn test_required_status_checks_rule_round_trip() {
    let json = r#"{
        "type": "required_status_checks",
        "parameters": {
            "required_status_checks": [
                {"context": "ci/build"},
                {"context": "ci/test", "integration_id": 42}
            ],
            "strict_required_status_checks_policy": true
        }
    }"#;

    let rule: Rule = from_str(json).expect("Failed to deserialize");

    match rule {
        Rule::RequiredStatusChecks { parameters } => {
            assert_eq!(parameters.required_status_checks.len(), 2);
            assert_eq!(parameters.required_status_checks[0].context, "ci/build");
            assert_eq!(parameters.required_status_checks[1].integration_id, Some(42));
            assert_eq!(parameters.strict_required_status_checks_policy, Some(true));
        }
        other => panic!("Expected required_status_checks rule, got {:?}", other),
    }
}

#[test]
fn test_unit_rule_serialization() {
    assert_eq!(
        to_string(&Rule::RequiredSignatures).expect("Failed to serialize"),
        r#"{"type":"required_signatures"}"#
    );
    assert_eq!(
        to_string(&Rule::Deletion).expect("Failed to serialize"),
        r#"{"type":"deletion"}"#
    );
    assert_eq!(
        to_string(&Rule::Update).expect("Failed to serialize"),
        r#"{"type":"update"}"#
    );
}

/// Test unmanaged rule types deserialize into Unknown instead of failing.
#[test]
fn test_unknown_rule_type_deserialization() {
    let json = r#"{
        "name": "kitchen-sink",
        "target": "branch",
        "enforcement": "active",
        "rules": [
            {"type": "deletion"},
            {"type": "commit_message_pattern"},
            {"type": "merge_queue"}
        ]
    }"#;

    let ruleset: RepositoryRuleset = from_str(json).expect("Failed to deserialize");

    assert_eq!(ruleset.rules.len(), 3);
    assert_eq!(ruleset.rules[0], Rule::Deletion);
    assert_eq!(ruleset.rules[1], Rule::Unknown);
    assert_eq!(ruleset.rules[2], Rule::Unknown);
}
