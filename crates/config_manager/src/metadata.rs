//! Repository tier metadata.
//!
//! The tier of a repository (`production`, `internal`, `prototype`) lives in
//! a `repo-metadata.yaml` file next to the policy. Any missing file, missing
//! field, or unrecognized value degrades to [`Tier::Internal`] with
//! [`TierSource::Default`] rather than failing the check that needs it.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;

/// Repository classification determining which named rulesets are expected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Production-grade repository
    Production,
    /// Internal tooling, the safe default
    #[default]
    Internal,
    /// Prototype or experiment
    Prototype,
}

impl Tier {
    /// Returns the tier name as written in `repo-metadata.yaml`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Production => "production",
            Tier::Internal => "internal",
            Tier::Prototype => "prototype",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Tier::Production),
            "internal" => Ok(Tier::Internal),
            "prototype" => Ok(Tier::Prototype),
            _ => Err(()),
        }
    }
}

/// Where a tier value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TierSource {
    /// Read from `repo-metadata.yaml`
    Metadata,
    /// Defaulted because the metadata was absent or invalid
    Default,
}

impl std::fmt::Display for TierSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TierSource::Metadata => f.write_str("repo-metadata.yaml"),
            TierSource::Default => f.write_str("default"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RepoMetadataDoc {
    tier: Option<String>,
}

impl Tier {
    /// Loads the tier from a `repo-metadata.yaml` file.
    ///
    /// Never fails: a missing file, unparseable document, missing `tier`
    /// field, or unrecognized value all produce the default tier, with the
    /// source recording that the default was used.
    pub fn load(path: &Path) -> (Tier, TierSource) {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No readable tier metadata, using default tier");
                return (Tier::default(), TierSource::Default);
            }
        };

        let doc: RepoMetadataDoc = match serde_yaml::from_str(&text) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Malformed tier metadata, using default tier");
                return (Tier::default(), TierSource::Default);
            }
        };

        match doc.tier.as_deref().map(Tier::from_str) {
            Some(Ok(tier)) => (tier, TierSource::Metadata),
            Some(Err(())) => {
                warn!(path = %path.display(), "Unrecognized tier value, using default tier");
                (Tier::default(), TierSource::Default)
            }
            None => {
                debug!(path = %path.display(), "Tier metadata has no tier field, using default tier");
                (Tier::default(), TierSource::Default)
            }
        }
    }
}
