// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Repo-clone mode: clone a list of `owner/name` repositories and dry-run
//! scan each clone, accumulating hits into one [`ResultStore`].

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::git::{self, RepoId};
use crate::modes::dryrun;
use crate::pattern::model::Pattern;
use crate::pattern::refine::FilterPolicy;
use crate::pattern::store::ResultStore;

/// One repository's clone-and-scan outcome.
#[derive(Debug)]
pub struct RepoCloneOutcome {
    pub repo: RepoId,
    pub files_scanned: usize,
    pub bytes_scanned: u64,
}

/// Clone every repo named in `repo_list` (the parsed contents of a
/// `--repos` list file) into `cache_root`, dry-run scanning each one.
/// Clone failures are logged and skipped; they do not abort the run.
pub fn run_repo_clone(
    repos: &[RepoId],
    cache_root: &Path,
    patterns: &[Pattern],
    policy: FilterPolicy,
) -> Result<(Vec<RepoCloneOutcome>, Arc<ResultStore>)> {
    let store = Arc::new(ResultStore::new());
    let mut outcomes = Vec::new();

    for repo in repos {
        let path = match git::clone_repo(repo, cache_root) {
            Ok(path) => path,
            Err(err) => {
                tracing::error!(owner = %repo.owner, name = %repo.name, error = %err, "failed to clone repo, skipping");
                continue;
            }
        };

        let summary = dryrun::run_dry_run(&path, patterns.to_vec(), policy)?;
        for type_label in summary.store.counts_by_pattern().into_keys() {
            for m in summary.store.matches_for(&type_label) {
                store.record(&type_label, m);
            }
        }

        outcomes.push(RepoCloneOutcome {
            repo: repo.clone(),
            files_scanned: summary.files_scanned,
            bytes_scanned: summary.bytes_scanned,
        });
    }

    Ok((outcomes, store))
}

#[cfg(test)]
#[path = "repoclone_tests.rs"]
mod tests;
