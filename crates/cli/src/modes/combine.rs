// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Combine mode: a pure transform over loaded pattern declarations. Unlike
//! every other mode, this never compiles or scans anything — it walks the
//! same tree the Pattern Loader walks, applies the same glob filtering, and
//! re-emits the verbatim filtered pattern mappings as one YAML document for
//! bulk upload to an external pattern-management UI.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::pattern::loader::{PATTERNS_FILE_NAME, PatternFilter};
use crate::pattern::model::RawPatternSet;
use crate::walker::{FileWalker, WalkerConfig};

/// The name every bulk-upload document declares for its collection.
const COLLECTION_NAME: &str = "Collection of custom patterns";

#[derive(Debug, Serialize)]
struct CombinedDocument {
    name: String,
    patterns: Vec<serde_yaml::Value>,
}

/// Outcome of a combine run: the number of source files visited and the
/// rendered YAML document.
#[derive(Debug)]
pub struct CombineOutcome {
    pub files_visited: usize,
    pub patterns_kept: usize,
    pub document: String,
}

/// Extract a raw pattern mapping's `type` (falling back to `name`, matching
/// the normalization rule) for filtering purposes, without fully validating
/// the entry the way the Pattern Loader does.
fn type_and_name(value: &serde_yaml::Value) -> Option<(String, String)> {
    let mapping = value.as_mapping()?;
    let name = mapping
        .get(serde_yaml::Value::from("name"))?
        .as_str()?
        .to_string();
    let type_label = mapping
        .get(serde_yaml::Value::from("type"))
        .and_then(serde_yaml::Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| name.clone());
    Some((type_label, name))
}

/// Walk `root` for `patterns.yml` documents, keep entries passing `filter`,
/// and render the combined YAML document.
pub fn run_combine(root: &Path, filter: &PatternFilter) -> Result<CombineOutcome> {
    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        hidden: false,
        ..Default::default()
    });
    let (files, _stats) = walker.walk_collect(root);

    let mut kept = Vec::new();
    let mut files_visited = 0;

    for file in &files {
        if file.path.file_name().and_then(|n| n.to_str()) != Some(PATTERNS_FILE_NAME) {
            continue;
        }
        files_visited += 1;

        let content = match std::fs::read(&file.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!(path = %file.path.display(), error = %err, "could not read patterns.yml, skipping");
                continue;
            }
        };
        let raw_set: RawPatternSet = match serde_yaml::from_slice(&content) {
            Ok(set) => set,
            Err(err) => {
                tracing::error!(path = %file.path.display(), error = %err, "malformed patterns.yml, skipping file");
                continue;
            }
        };

        for value in raw_set.patterns {
            let Some((type_label, name)) = type_and_name(&value) else {
                tracing::error!(path = %file.path.display(), "pattern entry missing name, skipping");
                continue;
            };
            if filter.type_filter.keep(&type_label) && filter.name_filter.keep(&name) {
                kept.push(value);
            }
        }
    }

    let document = CombinedDocument {
        name: COLLECTION_NAME.to_string(),
        patterns: kept,
    };
    let rendered = serde_yaml::to_string(&document)
        .map_err(|e| Error::Internal(format!("could not render combined document: {e}")))?;

    Ok(CombineOutcome {
        files_visited,
        patterns_kept: document.patterns.len(),
        document: rendered,
    })
}

#[cfg(test)]
#[path = "combine_tests.rs"]
mod tests;
