//! Configuration management for RepoSteward.
//!
//! This crate owns the local, declarative inputs to the governance checks:
//! the TOML policy file (branch and tag protection plus the `[extends]`
//! ruleset declarations) and the `repo-metadata.yaml` tier document. Loading
//! is strict for the policy file and forgiving for tier metadata, which
//! degrades to a safe default instead of failing hard.

pub mod errors;
pub use errors::{ConfigurationError, ConfigurationResult};

pub mod policy;
pub use policy::{
    DesiredBranchProtection, ExtendsConfig, PolicyConfig, TagProtectionConfig,
};

pub mod metadata;
pub use metadata::{Tier, TierSource};
