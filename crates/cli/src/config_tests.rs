#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use tempfile::TempDir;

#[test]
fn default_config_uses_documented_additional_matches_limit() {
    let config = Config::default();
    assert_eq!(config.additional_matches_limit(), 5);
}

#[test]
fn load_parses_a_minimal_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("patternscan.toml");
    std::fs::write(
        &path,
        r#"
additional_matches_limit = 8
include = ["aws_*"]
exclude = ["gcp_*"]
"#,
    )
    .unwrap();

    let config = load(&path).unwrap();
    assert_eq!(config.additional_matches_limit(), 8);
    assert_eq!(config.include, vec!["aws_*".to_string()]);
    assert_eq!(config.exclude, vec!["gcp_*".to_string()]);
}

#[test]
fn load_rejects_unknown_keys() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("patternscan.toml");
    std::fs::write(&path, "not_a_real_field = true\n").unwrap();

    let err = load(&path).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn load_missing_file_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("missing.toml");
    let err = load(&path).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn clone_cache_root_defaults_to_none() {
    let config = Config::default();
    assert!(config.clone_cache_root.is_none());
}
