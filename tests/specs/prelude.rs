//! Test helpers for behavioral specifications.
//!
//! Provides a high-level DSL for testing the `patternscan` CLI binary.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::path::Path;
use std::process::Command;

/// Returns a Command configured to run the patternscan binary.
pub fn patternscan_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("patternscan"))
}

/// Path to a checked-in fixture directory under `tests/fixtures`.
pub fn fixture(name: &str) -> std::path::PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    std::path::PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Builds an ad-hoc pattern-bundle directory: one `patterns.yml` plus
/// whatever sibling fixture files the caller writes alongside it.
pub struct TempBundle {
    pub dir: tempfile::TempDir,
}

impl TempBundle {
    pub fn new(patterns_yml: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("patterns.yml"), patterns_yml).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_fixture(&self, name: &str, content: &[u8]) -> &Self {
        std::fs::write(self.dir.path().join(name), content).unwrap();
        self
    }
}
