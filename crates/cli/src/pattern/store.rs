//! Thread-safe collector of observed matches, keyed by pattern name.
//!
//! Guarded by a single mutex rather than a sharded or lock-free map: the
//! design calls for one exclusion primitive that can also serialize
//! coherent multi-field logging alongside result writes.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::pattern::model::Match;

/// The collector passed explicitly to run modes. Not a process-level
/// global: modes that accumulate across calls (repo-clone) hold one
/// instance across multiple scans; modes that don't, create a fresh one.
#[derive(Default)]
pub struct ResultStore {
    inner: Mutex<HashMap<String, Vec<Match>>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a match under `pattern_name`. Writes are append-only during a
    /// scan phase.
    pub fn record(&self, pattern_name: &str, m: Match) {
        let mut guard = self.inner.lock().unwrap_or_else(|poison| poison.into_inner());
        guard.entry(pattern_name.to_string()).or_default().push(m);
    }

    /// Snapshot the matches recorded for one pattern name.
    pub fn matches_for(&self, pattern_name: &str) -> Vec<Match> {
        let guard = self.inner.lock().unwrap_or_else(|poison| poison.into_inner());
        guard.get(pattern_name).cloned().unwrap_or_default()
    }

    /// Total number of recorded matches across all pattern names.
    pub fn total_count(&self) -> usize {
        let guard = self.inner.lock().unwrap_or_else(|poison| poison.into_inner());
        guard.values().map(Vec::len).sum()
    }

    /// Per-pattern hit counts, for summary reporting.
    pub fn counts_by_pattern(&self) -> HashMap<String, usize> {
        let guard = self.inner.lock().unwrap_or_else(|poison| poison.into_inner());
        guard.iter().map(|(k, v)| (k.clone(), v.len())).collect()
    }

    /// Clear all recorded matches. Called at the start of each top-level
    /// mode invocation, unless the caller explicitly wants accumulation
    /// (the repo-clone mode aggregates across clones by simply not
    /// clearing between them).
    pub fn clear(&self) {
        let mut guard = self.inner.lock().unwrap_or_else(|poison| poison.into_inner());
        guard.clear();
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
