//! Walks a directory tree for `patterns.yml` documents and normalizes them
//! into [`PatternSet`] values, applying include/exclude glob filtering.

use std::collections::BTreeMap;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::pattern::model::{NormalizeError, Pattern, PatternSet, RawPattern, RawPatternSet};
use crate::walker::{FileWalker, WalkerConfig};

/// The basename every pattern bundle's configuration file must have.
pub const PATTERNS_FILE_NAME: &str = "patterns.yml";

/// Which field a glob filter is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Type,
    Name,
}

/// Include/exclude glob filtering for a single field.
#[derive(Debug, Default)]
pub struct GlobFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

/// Build error for malformed glob patterns.
#[derive(Debug, thiserror::Error)]
#[error("invalid glob pattern: {0}")]
pub struct GlobFilterError(String);

impl GlobFilter {
    pub fn build(include: &[String], exclude: &[String]) -> Result<Self, GlobFilterError> {
        let include = Self::build_set(include)?;
        let exclude = Self::build_set(exclude)?;
        Ok(GlobFilter { include, exclude })
    }

    fn build_set(globs: &[String]) -> Result<Option<GlobSet>, GlobFilterError> {
        if globs.is_empty() {
            return Ok(None);
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in globs {
            let glob = Glob::new(pattern).map_err(|e| GlobFilterError(e.to_string()))?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| GlobFilterError(e.to_string()))?;
        Ok(Some(set))
    }

    /// A value is kept iff (no include filter OR at least one include glob
    /// matches) AND (no exclude glob matches).
    pub fn keep(&self, value: &str) -> bool {
        let included = self.include.as_ref().is_none_or(|set| set.is_match(value));
        let excluded = self.exclude.as_ref().is_some_and(|set| set.is_match(value));
        included && !excluded
    }
}

/// Combined type-based and name-based filtering for loaded patterns.
#[derive(Debug, Default)]
pub struct PatternFilter {
    pub type_filter: GlobFilter,
    pub name_filter: GlobFilter,
}

impl PatternFilter {
    pub fn keep(&self, pattern: &Pattern) -> bool {
        self.type_filter.keep(&pattern.type_label) && self.name_filter.keep(&pattern.name)
    }
}

/// Default warning threshold for the combined count of `additional_match` +
/// `additional_not_match` entries a pattern may declare before
/// `--no-warn-on-additional-matches-number` is needed to silence it.
pub const DEFAULT_ADDITIONAL_MATCHES_LIMIT: usize = 5;

/// Warn (at the CLI boundary) when a pattern declares more additional-match
/// filters than `limit`. Advisory only — never fails the run.
pub fn warn_on_additional_matches_number(pattern: &Pattern, limit: usize) {
    let count = pattern.regex.additional_match.len() + pattern.regex.additional_not_match.len();
    if count > limit {
        tracing::warn!(
            pattern = %pattern.type_label,
            count,
            limit,
            "pattern declares more additional-match/not-match entries than the configured limit"
        );
    }
}

/// An additional-match filter string is considered anchored iff it starts
/// with `^` or ends with `$`. A caret or dollar appearing elsewhere in the
/// pattern (e.g. inside a character class or a literal) doesn't trigger the
/// GHES behavior difference this warning exists for.
fn is_anchored(s: &str) -> bool {
    s.starts_with('^') || s.ends_with('$')
}

/// Warn when any `additional_match` / `additional_not_match` regex anchors
/// with `^` or `$`: GHES versions before 3.8 evaluate these filters against
/// the whole scanned buffer rather than the line, so such anchors don't mean
/// what the pattern author likely intended. Advisory only.
pub fn warn_on_lt_ghes_3_8_anchors(pattern: &Pattern) {
    if pattern.regex.additional_match.iter().any(|s| is_anchored(s))
        || pattern.regex.additional_not_match.iter().any(|s| is_anchored(s))
    {
        tracing::warn!(
            pattern = %pattern.type_label,
            "additional_match/additional_not_match uses ^ or $ anchors, which behave \
             differently on GHES versions before 3.8"
        );
    }
}

/// A normalization failure for a single pattern entry, used for logging only
/// — it never aborts the enclosing file.
#[derive(Debug)]
pub struct SkippedPattern {
    pub source_path: String,
    pub reason: String,
}

/// Result of loading a single `patterns.yml`: the normalized, filtered set
/// plus any individually-skipped entries.
pub struct LoadedFile {
    pub set: PatternSet,
    pub skipped: Vec<SkippedPattern>,
}

/// Parse one `patterns.yml` document's bytes into a normalized, filtered
/// [`PatternSet`]. Malformed individual patterns are skipped and logged;
/// a malformed document (not valid YAML, or missing `patterns`) yields an
/// empty set.
pub fn parse_patterns_file(source_path: &str, content: &[u8], filter: &PatternFilter) -> LoadedFile {
    let raw_set: RawPatternSet = match serde_yaml::from_slice(content) {
        Ok(set) => set,
        Err(err) => {
            tracing::error!(path = source_path, error = %err, "malformed patterns.yml, skipping file");
            return LoadedFile {
                set: PatternSet {
                    name: String::new(),
                    display: true,
                    patterns: Vec::new(),
                    source_path: source_path.to_string(),
                },
                skipped: Vec::new(),
            };
        }
    };

    let mut patterns = Vec::new();
    let mut skipped = Vec::new();

    for raw_value in raw_set.patterns {
        let raw_pattern: RawPattern = match serde_yaml::from_value(raw_value.clone()) {
            Ok(p) => p,
            Err(err) => {
                skipped.push(SkippedPattern {
                    source_path: source_path.to_string(),
                    reason: err.to_string(),
                });
                tracing::error!(path = source_path, error = %err, "failed to validate pattern entry, skipping");
                continue;
            }
        };

        match Pattern::normalize(raw_pattern) {
            Ok(pattern) => {
                if filter.keep(&pattern) {
                    patterns.push(pattern);
                }
            }
            Err(err) => {
                skipped.push(SkippedPattern {
                    source_path: source_path.to_string(),
                    reason: err.to_string(),
                });
                tracing::error!(path = source_path, error = %err, "failed to normalize pattern, skipping");
            }
        }
    }

    LoadedFile {
        set: PatternSet {
            name: raw_set.name,
            display: raw_set.display,
            patterns,
            source_path: source_path.to_string(),
        },
        skipped,
    }
}

/// Walk `root` for `patterns.yml` files and load them all, keyed by source
/// path (ordered). Empty sets are retained in the map here; callers skip
/// them downstream per the empty-set-is-not-an-error invariant.
pub fn load_pattern_sets(root: &Path, filter: &PatternFilter) -> BTreeMap<String, PatternSet> {
    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        hidden: false,
        ..Default::default()
    });
    let (files, _stats) = walker.walk_collect(root);

    let mut sets = BTreeMap::new();
    for file in files {
        if file.path.file_name().and_then(|n| n.to_str()) != Some(PATTERNS_FILE_NAME) {
            continue;
        }
        let source_path = file.path.to_string_lossy().into_owned();
        let content = match std::fs::read(&file.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!(path = %source_path, error = %err, "could not read patterns.yml, skipping");
                continue;
            }
        };
        let loaded = parse_patterns_file(&source_path, &content, filter);
        sets.insert(source_path, loaded.set);
    }
    sets
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
