//! Compares observed matches against declared expectations per pattern.

use crate::pattern::model::{Expectation, Match, Pattern};
use crate::pattern::store::ResultStore;

/// The verdict for one pattern's reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternVerdict {
    pub type_label: String,
    /// Expectations with no matching observed match.
    pub missing: Vec<Expectation>,
    /// Observed matches that don't correspond to any expectation.
    pub unexpected: Vec<Match>,
    /// Informational only: the pattern had no declared expectations, so
    /// any observed matches are reported but never fail the run.
    pub informational: bool,
}

impl PatternVerdict {
    pub fn passed(&self) -> bool {
        self.informational || (self.missing.is_empty() && self.unexpected.is_empty())
    }
}

/// The `(file-basename, start_offset, end_offset)` triple equality rule
/// the Reconciler uses in fixture mode.
fn observed_matches_expectation(observed: &Match, expectation: &Expectation) -> bool {
    let basename_matches = observed
        .file_path
        .as_deref()
        .map(|path| {
            std::path::Path::new(path)
                .file_name()
                .and_then(|n| n.to_str())
                == Some(expectation.name.as_str())
        })
        .unwrap_or(false);

    basename_matches
        && observed.start_offset as i64 == expectation.start_offset
        && observed.end_offset as i64 == expectation.end_offset
}

/// Reconcile one pattern's declared expectations against its observed
/// matches. `expected` must already have `-1` sentinels resolved (see
/// [`crate::pattern::model::Expectation::resolve`]).
pub fn reconcile_pattern(pattern: &Pattern, expected: &[Expectation], observed: &[Match]) -> PatternVerdict {
    if expected.is_empty() {
        return PatternVerdict {
            type_label: pattern.type_label.clone(),
            missing: Vec::new(),
            unexpected: Vec::new(),
            informational: true,
        };
    }

    let missing: Vec<Expectation> = expected
        .iter()
        .filter(|expectation| {
            !observed
                .iter()
                .any(|m| observed_matches_expectation(m, expectation))
        })
        .cloned()
        .collect();

    let unexpected: Vec<Match> = observed
        .iter()
        .filter(|m| {
            !expected
                .iter()
                .any(|expectation| observed_matches_expectation(m, expectation))
        })
        .cloned()
        .collect();

    PatternVerdict {
        type_label: pattern.type_label.clone(),
        missing,
        unexpected,
        informational: false,
    }
}

/// Reconcile every pattern in a compiled set against the matches recorded
/// in `store`. Reading the store after all scans for the set have
/// completed (a join/barrier) is the caller's responsibility.
pub fn reconcile_all(
    patterns: &[Pattern],
    resolved_expectations: &[Vec<Expectation>],
    store: &ResultStore,
) -> Vec<PatternVerdict> {
    patterns
        .iter()
        .zip(resolved_expectations)
        .map(|(pattern, expected)| {
            let observed = store.matches_for(&pattern.name);
            reconcile_pattern(pattern, expected, &observed)
        })
        .collect()
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
