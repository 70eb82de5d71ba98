use super::*;

#[test]
fn test_remote_error_passes_through_display() {
    let err: Error = repo_steward_core::RemoteError::GhUnavailable.into();

    assert!(err.to_string().contains("gh CLI is not available"));
}

#[test]
fn test_apply_error_passes_through_display() {
    let err: Error = repo_steward_core::ApplyError::PermissionDenied {
        owner: "myorg".to_string(),
        repo: "myrepo".to_string(),
        message: "HTTP 403".to_string(),
    }
    .into();

    assert!(err.to_string().contains("Permission denied"));
    assert!(err.to_string().contains("myorg/myrepo"));
}

#[test]
fn test_config_error_is_prefixed() {
    let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err: Error = config_manager::ConfigurationError::FileRead {
        path: "repo-steward.toml".into(),
        source,
    }
    .into();

    assert!(err.to_string().starts_with("Configuration error:"));
}
