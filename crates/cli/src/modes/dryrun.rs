// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dry-run mode: scan an arbitrary directory tree with no expectations,
//! just per-pattern hit counts and (optionally) a one-line-per-hit report.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::pattern::model::Pattern;
use crate::pattern::refine::FilterPolicy;
use crate::pattern::store::ResultStore;
use crate::reader::FileReader;
use crate::scan::{self, Buffer};
use crate::walker::{FileWalker, WalkerConfig};

/// Summary of one dry-run scan.
#[derive(Debug)]
pub struct DryRunSummary {
    pub files_scanned: usize,
    pub bytes_scanned: u64,
    pub store: Arc<ResultStore>,
}

/// Plain recursive walk with no gitignore semantics: the caller is
/// scanning arbitrary third-party content, not their own tree.
fn walker_config() -> WalkerConfig {
    WalkerConfig {
        git_ignore: false,
        hidden: false,
        ..Default::default()
    }
}

/// Scan every regular file under `root` (skipping `.git`) against `patterns`,
/// recording hits into a fresh [`ResultStore`].
pub fn run_dry_run(root: &Path, patterns: Vec<Pattern>, policy: FilterPolicy) -> Result<DryRunSummary> {
    let store = Arc::new(ResultStore::new());
    let engine = scan::prepare(patterns, Arc::clone(&store), policy)?;

    let walker = FileWalker::new(walker_config());
    let (files, _stats) = walker.walk_collect(root);
    let reader = FileReader::new();

    let mut buffers = Vec::with_capacity(files.len());
    let mut bytes_scanned: u64 = 0;
    for file in &files {
        match reader.read(&file.path) {
            Ok(content) => {
                bytes_scanned += content.size;
                buffers.push(Buffer {
                    path: Some(file.path.to_string_lossy().into_owned()),
                    bytes: content.bytes,
                });
            }
            Err(err) => {
                tracing::warn!(path = %file.path.display(), error = %err, "skipping unreadable file during dry run");
            }
        }
    }

    let files_scanned = buffers.len();
    engine.scan_all(&buffers);

    Ok(DryRunSummary {
        files_scanned,
        bytes_scanned,
        store,
    })
}

#[cfg(test)]
#[path = "dryrun_tests.rs"]
mod tests;
