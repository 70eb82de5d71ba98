use super::*;

#[test]
fn test_parse_valid_spec() {
    let repo = RepoInfo::parse("myorg/myrepo").expect("Failed to parse");

    assert_eq!(repo.owner, "myorg");
    assert_eq!(repo.repo, "myrepo");
    assert_eq!(repo.full_name(), "myorg/myrepo");
    assert_eq!(repo.to_string(), "myorg/myrepo");
}

#[test]
fn test_parse_rejects_missing_slash() {
    let err = RepoInfo::parse("invalid").unwrap_err();

    assert_eq!(err.code(), "INVALID_REPO");
}

#[test]
fn test_parse_rejects_extra_segments() {
    let err = RepoInfo::parse("a/b/c").unwrap_err();

    assert_eq!(err.code(), "INVALID_REPO");
}

#[test]
fn test_parse_rejects_empty_segments() {
    assert!(RepoInfo::parse("/repo").is_err());
    assert!(RepoInfo::parse("owner/").is_err());
    assert!(RepoInfo::parse("/").is_err());
    assert!(RepoInfo::parse("").is_err());
}
