//! Crate for interacting with the GitHub REST API through the `gh` CLI.
//!
//! This crate treats the GitHub CLI as an authenticated HTTP client: every
//! request is dispatched as a `gh api` invocation, with JSON bodies piped
//! through stdin. Reconciliation logic is written against the [`GitHubClient`]
//! capability trait so it can be exercised with an in-memory fake.

use std::process::Stdio;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

pub mod errors;
pub use errors::Error;

pub mod ruleset;
pub use ruleset::{
    PullRequestParameters, RefNameCondition, RepositoryRuleset, RequiredStatusChecksParameters,
    Rule, RulesetConditions, RulesetEnforcement, RulesetTarget, StatusCheck,
};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// HTTP method for a GitHub API request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Returns the method name as passed to `gh api -X`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability trait for issuing authenticated GitHub API requests.
///
/// The single `request` operation keeps callers transport-agnostic: the
/// production implementation drives the `gh` CLI, while tests substitute an
/// in-memory fake that records calls and replays canned responses.
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Reports whether the underlying transport is usable at all.
    ///
    /// Never fails; an unusable transport is an environment condition, not an
    /// error of any particular request.
    async fn is_available(&self) -> bool;

    /// Issues a single request against the GitHub REST API.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method to use.
    /// * `path` - The API path, without a leading slash (e.g. `repos/owner/repo`).
    /// * `body` - Optional JSON request body.
    ///
    /// # Returns
    ///
    /// The parsed JSON response body. Endpoints that return an empty body
    /// produce `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HttpStatus`] when GitHub rejects the request,
    /// [`Error::GhNotFound`] when the transport binary is missing, and
    /// [`Error::CommandFailed`] for other transport-level failures.
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, Error>;
}

/// A [`GitHubClient`] backed by the `gh` CLI.
///
/// Authentication, proxies, and deadlines are all owned by `gh` itself; this
/// client only shapes the invocation and classifies failures.
///
/// # Examples
///
/// ```rust,no_run
/// use github_client::{GhCliClient, GitHubClient, HttpMethod};
///
/// # async fn example() -> Result<(), github_client::Error> {
/// let client = GhCliClient::new();
/// let repo = client
///     .request(HttpMethod::Get, "repos/my-org/my-repo", None)
///     .await?;
/// println!("default branch: {}", repo["default_branch"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct GhCliClient;

impl GhCliClient {
    /// Creates a new client driving the `gh` binary found on `PATH`.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GitHubClient for GhCliClient {
    async fn is_available(&self) -> bool {
        Command::new("gh")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        let mut cmd = Command::new("gh");
        cmd.arg("api").arg("-X").arg(method.as_str()).arg(path);

        if body.is_some() {
            // JSON bodies travel over stdin per the CLI's `--input -` convention.
            cmd.arg("--input").arg("-");
            cmd.stdin(Stdio::piped());
        } else {
            cmd.stdin(Stdio::null());
        }
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        debug!("Spawning gh api invocation");
        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::GhNotFound
            } else {
                Error::Io(e)
            }
        })?;

        if let Some(body) = body {
            let payload = serde_json::to_vec(body)?;
            let mut stdin = child.stdin.take().ok_or_else(|| Error::CommandFailed {
                message: "gh child process has no stdin handle".to_string(),
            })?;
            stdin.write_all(&payload).await.map_err(Error::Io)?;
            // Dropping the handle closes the pipe so gh sees end of input.
            drop(stdin);
        }

        let output = child.wait_with_output().await.map_err(Error::Io)?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if stdout.trim().is_empty() {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_str(stdout.trim())?)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(exit_code = output.status.code(), "gh api invocation failed");
            Err(classify_failure(stderr.trim()))
        }
    }
}

/// Classifies a failed `gh api` invocation from its stderr output.
///
/// `gh` reports HTTP-level rejections with an `(HTTP <status>)` marker, e.g.
/// `gh: Not Found (HTTP 404)`. Anything without such a marker is a
/// transport-level failure.
fn classify_failure(stderr: &str) -> Error {
    if let Some(status) = extract_http_status(stderr) {
        return Error::HttpStatus {
            status,
            message: stderr.to_string(),
        };
    }
    Error::CommandFailed {
        message: stderr.to_string(),
    }
}

/// Extracts the first `HTTP <status>` marker from CLI error output.
fn extract_http_status(text: &str) -> Option<u16> {
    for (idx, _) in text.match_indices("HTTP ") {
        let digits: String = text[idx + 5..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if let Ok(status) = digits.parse::<u16>() {
            if (100..=599).contains(&status) {
                return Some(status);
            }
        }
    }
    None
}
