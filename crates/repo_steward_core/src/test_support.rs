//! In-memory [`GitHubClient`] fake for unit tests.
//!
//! Replays canned responses keyed by `(method, path)` and records every
//! call so tests can assert on dispatch and call counts. Unregistered
//! paths answer HTTP 404, which matches how probing against a repository
//! without the resource behaves.

use std::sync::Mutex;

use async_trait::async_trait;
use github_client::{Error, GitHubClient, HttpMethod};
use serde_json::Value;

/// One recorded request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

/// A canned response for one route.
#[derive(Debug, Clone)]
pub enum FakeResponse {
    /// Respond with this JSON body
    Json(Value),
    /// Fail with this HTTP status
    Status(u16),
    /// Fail at the transport level with this message
    Transport(String),
}

/// In-memory fake GitHub client.
pub struct FakeGitHubClient {
    available: bool,
    routes: Vec<(HttpMethod, String, FakeResponse)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeGitHubClient {
    pub fn new() -> Self {
        Self {
            available: true,
            routes: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A client whose transport binary is missing.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Registers a JSON response for a route. First registration wins.
    pub fn with_json(mut self, method: HttpMethod, path: &str, body: Value) -> Self {
        self.routes
            .push((method, path.to_string(), FakeResponse::Json(body)));
        self
    }

    /// Registers an HTTP failure for a route.
    pub fn with_status(mut self, method: HttpMethod, path: &str, status: u16) -> Self {
        self.routes
            .push((method, path.to_string(), FakeResponse::Status(status)));
        self
    }

    /// Registers a transport-level failure for a route.
    pub fn with_transport_error(mut self, method: HttpMethod, path: &str, message: &str) -> Self {
        self.routes.push((
            method,
            path.to_string(),
            FakeResponse::Transport(message.to_string()),
        ));
        self
    }

    /// Returns every call made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Returns how many requests were issued.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock poisoned").len()
    }
}

#[async_trait]
impl GitHubClient for FakeGitHubClient {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(RecordedCall {
                method,
                path: path.to_string(),
                body: body.cloned(),
            });

        let route = self
            .routes
            .iter()
            .find(|(m, p, _)| *m == method && p == path);

        match route {
            Some((_, _, FakeResponse::Json(value))) => Ok(value.clone()),
            Some((_, _, FakeResponse::Status(status))) => Err(Error::HttpStatus {
                status: *status,
                message: format!("gh: simulated failure (HTTP {})", status),
            }),
            Some((_, _, FakeResponse::Transport(message))) => Err(Error::CommandFailed {
                message: message.clone(),
            }),
            None => Err(Error::HttpStatus {
                status: 404,
                message: "gh: Not Found (HTTP 404)".to_string(),
            }),
        }
    }
}
