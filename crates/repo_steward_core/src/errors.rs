//! Error types for remote verification and reconciliation.
//!
//! Two channels exist by design: [`RemoteError`] covers read-path failures
//! and fatal preconditions, while recoverable apply failures travel inside
//! [`crate::ApplyOutcome`] as structured data. Only a permission rejection
//! during apply is fatal, and that is the sole variant of [`ApplyError`].

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result alias for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors that can occur while verifying or reading remote repository state.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The repository spec did not parse as `owner/repo`.
    ///
    /// Raised locally, before any network traffic.
    #[error("Invalid repository '{input}': expected the form owner/repo")]
    InvalidRepo {
        /// The input as given
        input: String,
    },

    /// The `gh` CLI is not installed or not on `PATH`.
    ///
    /// An environment problem: evaluation is impossible, which callers
    /// report as a skip with a reason rather than a policy violation.
    #[error("gh CLI is not available")]
    GhUnavailable,

    /// The repository does not exist or is invisible to the current
    /// credentials (HTTP 404).
    #[error("Repository {owner}/{repo} not found")]
    RepoNotFound {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
    },

    /// The current credentials lack permission for the operation (HTTP 403).
    #[error("Permission denied for {resource}")]
    PermissionDenied {
        /// Resource the operation targeted
        resource: String,
    },

    /// Any other transport or API failure.
    #[error("GitHub API error: {message}")]
    Api {
        /// Failure description
        message: String,
    },
}

impl RemoteError {
    /// Returns the stable error code used in reports.
    pub fn code(&self) -> &'static str {
        match self {
            RemoteError::InvalidRepo { .. } => "INVALID_REPO",
            RemoteError::GhUnavailable => "NO_GH",
            RemoteError::RepoNotFound { .. } => "NO_REPO",
            RemoteError::PermissionDenied { .. } => "NO_PERMISSION",
            RemoteError::Api { .. } => "API_ERROR",
        }
    }

    /// Maps a client error from a repository-scoped request.
    pub(crate) fn from_client(err: github_client::Error, owner: &str, repo: &str) -> Self {
        match err.http_status() {
            Some(404) => RemoteError::RepoNotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
            },
            Some(403) => RemoteError::PermissionDenied {
                resource: format!("{}/{}", owner, repo),
            },
            _ => RemoteError::Api {
                message: err.to_string(),
            },
        }
    }
}

/// Fatal errors raised by the apply path.
///
/// Insufficient privilege invalidates the entire sync attempt: nothing was
/// changed and nothing can be, so this propagates instead of appearing in
/// the recoverable `failed` list.
#[derive(Error, Debug)]
pub enum ApplyError {
    /// GitHub rejected the ruleset write with HTTP 403.
    #[error("Permission denied applying ruleset to {owner}/{repo}: {message}")]
    PermissionDenied {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
        /// Error text from the rejected call
        message: String,
    },
}

impl ApplyError {
    /// Returns the stable error code used in reports.
    pub fn code(&self) -> &'static str {
        match self {
            ApplyError::PermissionDenied { .. } => "NO_PERMISSION",
        }
    }
}
