//! Remote verification and file-existence probing.
//!
//! The fetcher owns every read-only probe against the remote: repository
//! access verification and the standard file checks. File probing never
//! raises; a failed probe simply means the file is not there.

use std::sync::Arc;

use futures::future::join_all;
use github_client::{GitHubClient, HttpMethod};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::errors::{RemoteError, RemoteResult};
use crate::repository::RepoInfo;

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;

/// One file the policy expects to find in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteFileConfig {
    /// Primary path to probe
    pub path: String,

    /// Fallback paths, probed in order after `path`
    pub alternative_paths: Vec<String>,

    /// Whether absence is a violation
    pub required: bool,

    /// Human-readable name for reports
    pub description: String,
}

impl RemoteFileConfig {
    fn new(path: &str, alternatives: &[&str], required: bool, description: &str) -> Self {
        Self {
            path: path.to_string(),
            alternative_paths: alternatives.iter().map(|p| (*p).to_string()).collect(),
            required,
            description: description.to_string(),
        }
    }
}

/// Result of probing one file config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteFileCheck {
    /// The config that was probed
    pub config: RemoteFileConfig,

    /// Whether any of the candidate paths exists
    pub exists: bool,

    /// The path that was found, if any
    pub found_path: Option<String>,

    /// Every path actually probed, in probe order
    pub checked_paths: Vec<String>,
}

/// The fixed table of standard repository files.
pub fn standard_file_checks() -> Vec<RemoteFileConfig> {
    vec![
        RemoteFileConfig::new(
            "CODEOWNERS",
            &[".github/CODEOWNERS", "docs/CODEOWNERS"],
            true,
            "CODEOWNERS",
        ),
        RemoteFileConfig::new("README.md", &[], true, "README"),
        RemoteFileConfig::new("LICENSE", &["LICENSE.md", "LICENSE.txt"], false, "license"),
        RemoteFileConfig::new("SECURITY.md", &[], false, "security policy"),
        RemoteFileConfig::new("CONTRIBUTING.md", &[], false, "contributing guide"),
    ]
}

/// Read-only remote probing on top of a [`GitHubClient`].
pub struct RemoteFetcher<C> {
    /// Client for GitHub API operations
    client: Arc<C>,
}

impl<C: GitHubClient> RemoteFetcher<C> {
    /// Creates a new fetcher on top of the given client.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Reports whether the gh CLI transport is usable. Never errors.
    pub async fn is_gh_available(&self) -> bool {
        self.client.is_available().await
    }

    /// Verifies that the repository exists and is accessible.
    ///
    /// # Errors
    ///
    /// Maps HTTP 404 to [`RemoteError::RepoNotFound`], HTTP 403 to
    /// [`RemoteError::PermissionDenied`], and anything else to
    /// [`RemoteError::Api`].
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn verify_repo_access(&self, repo: &RepoInfo) -> RemoteResult<()> {
        self.client
            .request(
                HttpMethod::Get,
                &format!("repos/{}/{}", repo.owner, repo.repo),
                None,
            )
            .await
            .map(|_| ())
            .map_err(|e| RemoteError::from_client(e, &repo.owner, &repo.repo))
    }

    /// Probes whether one file exists in the repository.
    ///
    /// Returns `false` on any failure; file-existence probing never raises.
    pub async fn check_remote_file_exists(&self, repo: &RepoInfo, path: &str) -> bool {
        self.client
            .request(
                HttpMethod::Get,
                &format!("repos/{}/{}/contents/{}", repo.owner, repo.repo, path),
                None,
            )
            .await
            .is_ok()
    }

    /// Probes one file config: the primary path, then each alternative in
    /// order, stopping at the first that exists.
    pub async fn check_remote_file(
        &self,
        repo: &RepoInfo,
        config: &RemoteFileConfig,
    ) -> RemoteFileCheck {
        let mut checked_paths = Vec::new();
        for path in std::iter::once(&config.path).chain(config.alternative_paths.iter()) {
            checked_paths.push(path.clone());
            if self.check_remote_file_exists(repo, path).await {
                debug!(repo = %repo, path = %path, "Found remote file");
                return RemoteFileCheck {
                    config: config.clone(),
                    exists: true,
                    found_path: Some(path.clone()),
                    checked_paths,
                };
            }
        }
        debug!(repo = %repo, file = %config.description, "Remote file not found");
        RemoteFileCheck {
            config: config.clone(),
            exists: false,
            found_path: None,
            checked_paths,
        }
    }

    /// Probes a list of independent file configs concurrently.
    ///
    /// Results come back in config order regardless of completion order.
    pub async fn check_remote_files(
        &self,
        repo: &RepoInfo,
        configs: &[RemoteFileConfig],
    ) -> Vec<RemoteFileCheck> {
        join_all(configs.iter().map(|c| self.check_remote_file(repo, c))).await
    }
}
