//! Repository identity.

use serde::{Deserialize, Serialize};

use crate::errors::RemoteError;

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// Identifies a GitHub repository.
///
/// Derived once by parsing an `owner/repo` string; immutable afterwards.
///
/// # Examples
///
/// ```rust
/// use repo_steward_core::RepoInfo;
///
/// let repo = RepoInfo::parse("myorg/myrepo").unwrap();
/// assert_eq!(repo.owner, "myorg");
/// assert_eq!(repo.repo, "myrepo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    /// Repository owner (user or organization)
    pub owner: String,

    /// Repository name
    pub repo: String,
}

impl RepoInfo {
    /// Parses an `owner/repo` string.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidRepo`] unless the input is exactly two
    /// non-empty `/`-separated segments.
    pub fn parse(spec: &str) -> Result<Self, RemoteError> {
        let parts: Vec<&str> = spec.split('/').collect();
        match parts.as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: (*owner).to_string(),
                repo: (*repo).to_string(),
            }),
            _ => Err(RemoteError::InvalidRepo {
                input: spec.to_string(),
            }),
        }
    }

    /// Returns the `owner/repo` form.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl std::fmt::Display for RepoInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
