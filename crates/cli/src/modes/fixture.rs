// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture test mode: for every directory with a `patterns.yml`, compile
//! its patterns, scan every sibling fixture file, and reconcile the
//! observed matches against the pattern's declared `expected` entries.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::pattern::loader::{PATTERNS_FILE_NAME, PatternFilter, load_pattern_sets};
use crate::pattern::model::Expectation;
use crate::pattern::reconcile::{PatternVerdict, reconcile_all};
use crate::pattern::refine::FilterPolicy;
use crate::pattern::store::ResultStore;
use crate::scan::{self, Buffer};

/// Names excluded from fixture scanning alongside the pattern file itself:
/// documentation, not a positive/negative sample.
const EXCLUDED_FIXTURE_NAMES: &[&str] = &["README.md", PATTERNS_FILE_NAME];

/// The reconciliation outcome for one `patterns.yml`.
#[derive(Debug)]
pub struct FixtureOutcome {
    pub source_path: String,
    pub set_name: String,
    pub verdicts: Vec<PatternVerdict>,
}

impl FixtureOutcome {
    pub fn passed(&self) -> bool {
        self.verdicts.iter().all(PatternVerdict::passed)
    }
}

/// Run fixture tests across every `patterns.yml` under `root`.
pub fn run_fixture_tests(
    root: &Path,
    filter: &PatternFilter,
    policy: FilterPolicy,
) -> Result<Vec<FixtureOutcome>> {
    let sets = load_pattern_sets(root, filter);
    let mut outcomes = Vec::new();

    for (source_path, set) in sets {
        // Empty pattern sets are skipped, not treated as errors.
        if set.is_empty() {
            continue;
        }

        let dir = Path::new(&source_path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());

        let fixtures = read_sibling_fixtures(&dir)?;

        let store = Arc::new(ResultStore::new());
        let engine = scan::prepare(set.patterns.clone(), Arc::clone(&store), policy)?;

        let buffers: Vec<Buffer> = fixtures
            .iter()
            .map(|(name, bytes)| Buffer {
                path: Some(name.clone()),
                bytes: bytes.clone(),
            })
            .collect();
        engine.scan_all(&buffers);

        // Resolve each pattern's `-1` sentinels at ingress, against the
        // byte length of the specific fixture file the expectation names.
        let resolved: Vec<Vec<Expectation>> = set
            .patterns
            .iter()
            .map(|pattern| {
                pattern
                    .expected
                    .iter()
                    .map(|expectation| {
                        let buffer_len = fixtures
                            .get(&expectation.name)
                            .map(Vec::len)
                            .unwrap_or(0);
                        expectation.resolve(buffer_len)
                    })
                    .collect()
            })
            .collect();

        let verdicts = reconcile_all(&set.patterns, &resolved, &store);

        outcomes.push(FixtureOutcome {
            source_path,
            set_name: set.name,
            verdicts,
        });
    }

    Ok(outcomes)
}

/// Read every direct sibling file of `dir` except the pattern file and the
/// other excluded names, keyed by basename.
fn read_sibling_fixtures(dir: &Path) -> Result<BTreeMap<String, Vec<u8>>> {
    let mut fixtures = BTreeMap::new();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::error!(dir = %dir.display(), error = %err, "could not read fixture directory, skipping");
            return Ok(fixtures);
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if EXCLUDED_FIXTURE_NAMES.contains(&name) {
            continue;
        }
        match std::fs::read(&path) {
            Ok(bytes) => {
                fixtures.insert(name.to_string(), bytes);
            }
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "could not read fixture file, skipping");
            }
        }
    }

    Ok(fixtures)
}

#[cfg(test)]
#[path = "fixture_tests.rs"]
mod tests;
