// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Optional TOML run-configuration, layered under explicit CLI flags.
//!
//! Mirrors the teacher's config-loading shape (`toml::from_str` into a
//! `#[serde(deny_unknown_fields)]` struct, errors mapped through
//! [`crate::error::Error::Config`]) scaled down to this system's much
//! smaller knob set: the `additional_matches_limit` threshold, the
//! repo-clone cache root, and default include/exclude globs.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::pattern::loader::DEFAULT_ADDITIONAL_MATCHES_LIMIT;

/// Run-configuration loaded from `-C/--config`. Every field is optional so
/// CLI flags can layer defaults underneath without clobbering an explicit
/// choice; `Config::default()` is used when no file is supplied.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Warn when a pattern declares more additional-match/not-match entries
    /// than this. Defaults to [`DEFAULT_ADDITIONAL_MATCHES_LIMIT`].
    #[serde(default)]
    pub additional_matches_limit: Option<usize>,

    /// Root directory repo-clone mode clones into. Defaults to
    /// [`crate::git::default_cache_root`].
    #[serde(default)]
    pub clone_cache_root: Option<PathBuf>,

    /// Default `--include` globs (pattern `type`), layered under any
    /// explicit CLI `--include` values.
    #[serde(default)]
    pub include: Vec<String>,

    /// Default `--exclude` globs (pattern `type`).
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Default `--include-name` globs (pattern `name`).
    #[serde(default)]
    pub include_name: Vec<String>,

    /// Default `--exclude-name` globs (pattern `name`).
    #[serde(default)]
    pub exclude_name: Vec<String>,
}

impl Config {
    /// The effective additional-matches-number warning threshold: the
    /// config value if set, else the documented default.
    pub fn additional_matches_limit(&self) -> usize {
        self.additional_matches_limit
            .unwrap_or(DEFAULT_ADDITIONAL_MATCHES_LIMIT)
    }
}

/// Load and parse a run-configuration file. A malformed TOML document fails
/// fast with a `Config` error (exit code 2 at the CLI boundary), unlike the
/// per-pattern YAML errors in the Pattern Loader, which only skip the
/// offending pattern.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
