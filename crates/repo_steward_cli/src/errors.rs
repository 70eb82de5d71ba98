use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the RepoSteward CLI application.
///
/// Remote and apply errors pass through from the core with their
/// classification intact; configuration errors cover unreadable or
/// malformed policy files.
#[derive(Error, Debug)]
pub enum Error {
    /// Loading or parsing the policy file failed.
    #[error("Configuration error: {0}")]
    Config(#[from] config_manager::ConfigurationError),

    /// A remote verification or read failed.
    #[error("{0}")]
    Remote(#[from] repo_steward_core::RemoteError),

    /// An apply was fatally rejected.
    #[error("{0}")]
    Apply(#[from] repo_steward_core::ApplyError),
}
