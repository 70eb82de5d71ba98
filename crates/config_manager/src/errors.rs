//! Error types for configuration loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result alias for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;

/// Errors that can occur while loading local configuration files.
///
/// Tier metadata is deliberately absent from this taxonomy: a missing or
/// malformed `repo-metadata.yaml` degrades to the default tier rather than
/// raising.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The configuration file could not be read from disk.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        /// Path of the file that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The policy file contains invalid TOML.
    #[error("Failed to parse policy file {path}: {source}")]
    PolicyParse {
        /// Path of the file that failed to parse
        path: PathBuf,
        /// Underlying TOML parse error
        source: toml::de::Error,
    },
}
