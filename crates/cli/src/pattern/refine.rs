//! Second-pass, capture-aware refinement of raw matcher hits.
//!
//! The fast multi-pattern matcher (see [`crate::pattern::compiler`]) reports
//! only a pattern index and a raw span. This stage re-matches that span with
//! a backtracking engine that supports named captures, recovering the
//! `start` / `pattern` / `end` fragments, applying the `additional_match` /
//! `additional_not_match` filters, and adjusting offsets inward to the body
//! capture.

use crate::error::{Error, Result};
use crate::pattern::compiler::RawHit;
use crate::pattern::model::{CapturedFragments, Match, Pattern};

/// Per-pattern compiled refinement state: a named-capture backtracking
/// regex plus compiled filter regexes.
pub struct Refiner {
    named: pcre2::bytes::Regex,
    additional_match: Vec<regex::bytes::Regex>,
    additional_not_match: Vec<regex::bytes::Regex>,
}

/// Controls whether the `additional_match` / `additional_not_match` filters
/// are applied at all.
#[derive(Debug, Clone, Copy)]
pub struct FilterPolicy {
    pub apply_additional_matches: bool,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        FilterPolicy {
            apply_additional_matches: true,
        }
    }
}

impl Refiner {
    /// Compile the named-capture regex and filter regexes for one pattern.
    pub fn compile(pattern: &Pattern) -> Result<Self> {
        let named = pcre2::bytes::RegexBuilder::new()
            .build(&pattern.regex.combined_source())
            .map_err(|e| Error::Compile {
                type_label: pattern.type_label.clone(),
                message: e.to_string(),
            })?;

        let additional_match = Self::compile_filters(&pattern.regex.additional_match)?;
        let additional_not_match = Self::compile_filters(&pattern.regex.additional_not_match)?;

        Ok(Refiner {
            named,
            additional_match,
            additional_not_match,
        })
    }

    fn compile_filters(sources: &[String]) -> Result<Vec<regex::bytes::Regex>> {
        sources
            .iter()
            .map(|s| regex::bytes::Regex::new(s).map_err(|e| Error::FilterCompile(e.to_string())))
            .collect()
    }

    /// Re-match `haystack[hit.start..hit.end]`, recover captures, apply
    /// filters, and adjust offsets inward. Returns `None` if the filters
    /// suppress the match (logged at debug level by the caller).
    pub fn refine(
        &self,
        hit: RawHit,
        haystack: &[u8],
        pattern_index: usize,
        file_path: Option<&str>,
        policy: FilterPolicy,
    ) -> Result<Option<Match>> {
        let slice = &haystack[hit.start..hit.end];

        let caps = self
            .named
            .captures(slice)
            .map_err(|e| Error::Internal(format!("refinement match failed: {e}")))?;

        let Some(caps) = caps else {
            return Ok(None);
        };

        let start_bytes = caps.name("start").map(|m| m.as_bytes()).unwrap_or(b"");
        let pattern_bytes = caps.name("pattern").map(|m| m.as_bytes()).unwrap_or(b"");
        let end_bytes = caps.name("end").map(|m| m.as_bytes()).unwrap_or(b"");

        if policy.apply_additional_matches
            && !self.passes_filters(pattern_bytes)
        {
            return Ok(None);
        }

        let start_offset = hit.start + start_bytes.len();
        let end_offset = hit.end - end_bytes.len();

        Ok(Some(Match {
            pattern_index,
            file_path: file_path.map(str::to_string),
            start_offset,
            end_offset,
            captured: CapturedFragments {
                start: decode_lossy(start_bytes),
                pattern: decode_lossy(pattern_bytes),
                end: decode_lossy(end_bytes),
            },
        }))
    }

    fn passes_filters(&self, body: &[u8]) -> bool {
        let all_match = self.additional_match.iter().all(|re| re.is_match(body));
        let none_match = self.additional_not_match.iter().all(|re| !re.is_match(body));
        all_match && none_match
    }
}

/// Decode a captured byte slice for reporting: UTF-8, then a single-byte
/// (Latin-1-style) fallback, then a debug-printable fallback. Offsets
/// remain byte-accurate regardless of which path is taken.
pub fn decode_lossy(bytes: &[u8]) -> String {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }
    if bytes.iter().all(|&b| b < 0x100) {
        return bytes.iter().map(|&b| b as char).collect();
    }
    format!("{bytes:?}")
}

/// Compile a [`Refiner`] for every pattern, in the same order, so refiners
/// can be indexed by the raw matcher's `pattern_index`.
pub fn compile_all(patterns: &[Pattern]) -> Result<Vec<Refiner>> {
    patterns.iter().map(Refiner::compile).collect()
}

#[cfg(test)]
#[path = "refine_tests.rs"]
mod tests;
