// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Repo-clone mode's collaborator: clones `owner/name` repositories into a
//! per-run cache directory so they can be dry-run-scanned like any other
//! directory tree.
//!
//! Treated as a byte-stream source per the design: once a clone lands on
//! disk, nothing here interprets its contents — the dry-run walker and
//! reader take over.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// `owner/name` parsed from one line of a `--repos` list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (owner, name) = line.split_once('/')?;
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Some(RepoId {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    fn clone_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }

    /// Where this repo lands under a clone-cache root: `<root>/<owner>/<name>`.
    pub fn path_under(&self, cache_root: &Path) -> PathBuf {
        cache_root.join(&self.owner).join(&self.name)
    }
}

/// Parse a `--repos` list file: one `owner/name` per line, blank lines and
/// `#`-prefixed comments ignored.
pub fn parse_repo_list(content: &str) -> Vec<RepoId> {
    content.lines().filter_map(RepoId::parse).collect()
}

/// Default clone-cache root: `$HOME/.local/patternscan/repos`, or a fresh
/// temporary directory when `HOME` is unset.
pub fn default_cache_root() -> PathBuf {
    cache_root_from_home(std::env::var_os("HOME").map(PathBuf::from))
}

/// Pure helper behind [`default_cache_root`], split out so tests don't need
/// to mutate process-wide environment state.
fn cache_root_from_home(home: Option<PathBuf>) -> PathBuf {
    match home {
        Some(home) => home.join(".local").join("patternscan").join("repos"),
        None => std::env::temp_dir().join(format!("patternscan-repos-{}", std::process::id())),
    }
}

/// Clone one repo into `cache_root`, skipping the clone if it already
/// exists on disk (reusing a prior run's cache). Clone failures are the
/// caller's to log and skip — they never abort the run.
pub fn clone_repo(repo: &RepoId, cache_root: &Path) -> Result<PathBuf> {
    let dest = repo.path_under(cache_root);
    if dest.exists() {
        return Ok(dest);
    }

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    git2::Repository::clone(&repo.clone_url(), &dest)
        .map_err(|e| Error::Internal(format!("clone failed for {}/{}: {e}", repo.owner, repo.name)))?;

    Ok(dest)
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
