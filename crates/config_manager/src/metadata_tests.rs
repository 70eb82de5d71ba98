//! Tests for tier metadata loading.

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_metadata(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[test]
fn test_load_production_tier() {
    let file = write_metadata("tier: production\nowner: platform-team\n");

    let (tier, source) = Tier::load(file.path());

    assert_eq!(tier, Tier::Production);
    assert_eq!(source, TierSource::Metadata);
}

#[test]
fn test_load_prototype_tier() {
    let file = write_metadata("tier: prototype\n");

    let (tier, source) = Tier::load(file.path());

    assert_eq!(tier, Tier::Prototype);
    assert_eq!(source, TierSource::Metadata);
}

#[test]
fn test_missing_file_defaults_to_internal() {
    let (tier, source) = Tier::load(Path::new("/nonexistent/repo-metadata.yaml"));

    assert_eq!(tier, Tier::Internal);
    assert_eq!(source, TierSource::Default);
}

#[test]
fn test_missing_tier_field_defaults_to_internal() {
    let file = write_metadata("owner: platform-team\n");

    let (tier, source) = Tier::load(file.path());

    assert_eq!(tier, Tier::Internal);
    assert_eq!(source, TierSource::Default);
}

#[test]
fn test_unrecognized_tier_value_defaults_to_internal() {
    let file = write_metadata("tier: experimental\n");

    let (tier, source) = Tier::load(file.path());

    assert_eq!(tier, Tier::Internal);
    assert_eq!(source, TierSource::Default);
}

#[test]
fn test_malformed_yaml_defaults_to_internal() {
    let file = write_metadata("tier: [unterminated\n");

    let (tier, source) = Tier::load(file.path());

    assert_eq!(tier, Tier::Internal);
    assert_eq!(source, TierSource::Default);
}

#[test]
fn test_tier_display_and_parse_round_trip() {
    for tier in [Tier::Production, Tier::Internal, Tier::Prototype] {
        assert_eq!(tier.as_str().parse::<Tier>(), Ok(tier));
    }
    assert!("Production".parse::<Tier>().is_err());
}

#[test]
fn test_tier_source_display() {
    assert_eq!(TierSource::Metadata.to_string(), "repo-metadata.yaml");
    assert_eq!(TierSource::Default.to_string(), "default");
}
