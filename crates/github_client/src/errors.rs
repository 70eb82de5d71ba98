//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when driving the GitHub
//! API through the `gh` CLI. HTTP-level rejections keep their status code so
//! callers can distinguish missing resources from permission failures.

use std::io;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// Transport-level problems (a missing binary, a broken pipe) are separated
/// from HTTP-level rejections so that callers can classify failures without
/// re-parsing error text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The `gh` invocation failed without an HTTP status.
    ///
    /// This covers CLI-level failures such as missing authentication, an
    /// unreachable network, or malformed invocations. The contained message
    /// is the CLI's stderr output.
    #[error("gh invocation failed: {message}")]
    CommandFailed {
        /// stderr output of the failed invocation
        message: String,
    },

    /// The `gh` binary could not be found on `PATH`.
    ///
    /// This is an environment problem rather than a request failure; callers
    /// typically surface it as a skip with a reason instead of a violation.
    #[error("gh CLI not found on PATH")]
    GhNotFound,

    /// GitHub rejected the request with an HTTP error status.
    ///
    /// The status code is preserved for classification: 404 means the
    /// resource does not exist or is invisible to the current credentials,
    /// 403 means the credentials lack permission for the operation.
    #[error("GitHub API request failed with HTTP {status}: {message}")]
    HttpStatus {
        /// HTTP status code reported by the CLI
        status: u16,
        /// stderr output of the failed invocation
        message: String,
    },

    /// Error reading from or writing to the spawned CLI process.
    #[error("I/O error communicating with gh: {0}")]
    Io(#[from] io::Error),

    /// Error serializing the request body or deserializing the response.
    ///
    /// A deserialization failure usually means the endpoint returned
    /// something other than JSON, which indicates an API change or a
    /// misconstructed request path.
    #[error("Failed to process GitHub response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns the HTTP status code if this error carries one.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
