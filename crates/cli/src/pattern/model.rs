//! Normalized value types for pattern bundles.
//!
//! Mirrors the dataclass hierarchy of the original tool (`Regex`, `Pattern`,
//! `Expected`, `PatternsConfig`) as plain, immutable value types rather than
//! dynamically-validated records.

use serde::Deserialize;

/// Default `start` fragment when a regex omits one: start-of-data or a
/// non-alphanumeric boundary.
pub const DEFAULT_START: &str = r"\A|[^0-9A-Za-z]";

/// Default `end` fragment when a regex omits one: end-of-data or a
/// non-alphanumeric boundary.
pub const DEFAULT_END: &str = r"\z|[^0-9A-Za-z]";

/// A single regex declaration: the secret body plus optional delimiter
/// fragments and post-match filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regex {
    pub pattern: String,
    pub version: String,
    pub start: String,
    pub end: String,
    pub additional_match: Vec<String>,
    pub additional_not_match: Vec<String>,
}

/// Raw, pre-normalization shape of a `regex:` mapping as it appears in
/// `patterns.yml`.
#[derive(Debug, Deserialize)]
pub struct RawRegex {
    pub pattern: String,
    #[serde(default)]
    pub version: Option<RawVersion>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub additional_match: Vec<String>,
    #[serde(default)]
    pub additional_not_match: Vec<String>,
}

/// `version` may be written as a bare number (`1`, `0.2`) or a string in
/// hand-authored YAML; both are coerced to a normalized `v`-prefixed string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawVersion {
    String(String),
    Number(f64),
}

impl RawVersion {
    fn normalize(&self) -> String {
        let raw = match self {
            RawVersion::String(s) => s.clone(),
            RawVersion::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        };
        if raw.starts_with('v') {
            raw
        } else {
            format!("v{raw}")
        }
    }
}

/// Error while normalizing a raw regex or expectation into its value form.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("pattern body is empty after trimming whitespace")]
    EmptyPattern,
    #[error("start_offset must be >= -1")]
    InvalidStartOffset,
    #[error("end_offset must be positive or -1 (zero is not a valid end offset)")]
    InvalidEndOffset,
}

impl Regex {
    /// Normalize a raw deserialized regex mapping into its value form.
    pub fn normalize(raw: RawRegex) -> Result<Self, NormalizeError> {
        let pattern = raw.pattern.trim().to_string();
        if pattern.is_empty() {
            return Err(NormalizeError::EmptyPattern);
        }

        let version = raw
            .version
            .as_ref()
            .map(RawVersion::normalize)
            .unwrap_or_else(|| "v0.1".to_string());

        let start = raw
            .start
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_START.to_string());

        let end = raw
            .end
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_END.to_string());

        Ok(Regex {
            pattern,
            version,
            start,
            end,
            additional_match: raw.additional_match,
            additional_not_match: raw.additional_not_match,
        })
    }

    /// The combined regex assembled by the matcher compiler:
    /// `(start)(pattern)(end)`, with named groups for refinement.
    pub fn combined_source(&self) -> String {
        format!(
            "(?P<start>{})(?P<pattern>{})(?P<end>{})",
            self.start, self.pattern, self.end
        )
    }
}

/// A declared `(file-basename, start_offset, end_offset)` triple the engine
/// must reproduce exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    pub name: String,
    pub start_offset: i64,
    pub end_offset: i64,
}

#[derive(Debug, Deserialize)]
pub struct RawExpectation {
    pub name: String,
    #[serde(default = "default_offset")]
    pub start_offset: i64,
    #[serde(default = "default_offset")]
    pub end_offset: i64,
}

fn default_offset() -> i64 {
    -1
}

impl Expectation {
    /// Validate a raw expectation's shape. Does *not* resolve `-1`
    /// sentinels — that happens once at ingress, against the owning
    /// fixture's buffer length (see [`Expectation::resolve`]).
    pub fn from_raw(raw: RawExpectation) -> Result<Self, NormalizeError> {
        if raw.start_offset < -1 {
            return Err(NormalizeError::InvalidStartOffset);
        }
        if raw.end_offset == 0 || raw.end_offset < -1 {
            return Err(NormalizeError::InvalidEndOffset);
        }
        Ok(Expectation {
            name: raw.name,
            start_offset: raw.start_offset,
            end_offset: raw.end_offset,
        })
    }

    /// Resolve `-1` sentinels ("end of data") against `buffer_len`,
    /// returning a new expectation with absolute offsets.
    pub fn resolve(&self, buffer_len: usize) -> Expectation {
        let resolve_offset = |offset: i64| -> i64 {
            if offset == -1 {
                buffer_len as i64
            } else {
                offset
            }
        };
        Expectation {
            name: self.name.clone(),
            start_offset: resolve_offset(self.start_offset),
            end_offset: resolve_offset(self.end_offset),
        }
    }
}

/// A single pattern declaration within a pattern set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub name: String,
    /// Stable identifier correlating matches with external alert records.
    /// Not required to be unique within a bundle.
    pub type_label: String,
    pub description: Option<String>,
    pub experimental: bool,
    pub regex: Regex,
    pub expected: Vec<Expectation>,
    pub comments: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawPattern {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub experimental: bool,
    pub regex: RawRegex,
    #[serde(default)]
    pub expected: Vec<RawExpectation>,
    #[serde(default)]
    pub comments: Vec<String>,
}

impl Pattern {
    pub fn normalize(raw: RawPattern) -> Result<Self, NormalizeError> {
        let regex = Regex::normalize(raw.regex)?;
        let mut expected = Vec::with_capacity(raw.expected.len());
        for raw_expectation in raw.expected {
            expected.push(Expectation::from_raw(raw_expectation)?);
        }
        Ok(Pattern {
            name: raw.name.clone(),
            type_label: raw.type_label.unwrap_or(raw.name),
            description: raw.description,
            experimental: raw.experimental,
            regex,
            expected,
            comments: raw.comments,
        })
    }
}

/// The collection of pattern declarations loaded from one `patterns.yml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet {
    pub name: String,
    pub display: bool,
    pub patterns: Vec<Pattern>,
    pub source_path: String,
}

#[derive(Debug, Deserialize)]
pub struct RawPatternSet {
    pub name: String,
    #[serde(default = "default_display")]
    pub display: bool,
    #[serde(default)]
    pub patterns: Vec<serde_yaml::Value>,
}

fn default_display() -> bool {
    true
}

impl PatternSet {
    /// True iff this pattern set has no valid patterns and should be
    /// skipped downstream rather than treated as an error.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// A match observed during a scan, with byte-accurate offsets and decoded
/// capture fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub pattern_index: usize,
    pub file_path: Option<String>,
    pub start_offset: usize,
    pub end_offset: usize,
    pub captured: CapturedFragments,
}

/// The three labelled regex captures recovered during refinement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFragments {
    pub start: String,
    pub pattern: String,
    pub end: String,
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
