//! Compiles normalized patterns into a single multi-pattern streaming
//! matcher.
//!
//! The matcher reports only a pattern index and a raw `[start, end)` span
//! per hit — it never exposes capture groups. Sub-capture extraction is the
//! [`crate::pattern::refine`] stage's job, using a second, backtracking
//! engine. This split is load-bearing: collapsing it into one engine would
//! lose the throughput this matcher is chosen for.

use std::sync::Arc;

use regex_automata::meta::Regex as MetaRegex;
use regex_automata::{Match as AutomataMatch, MatchKind};

use crate::error::{Error, Result};
use crate::pattern::model::Pattern;

/// A compiled, immutable multi-pattern matcher plus the pattern vector it
/// was compiled from. Shared read-only (`Arc`) across scan workers.
pub struct CompiledMatcher {
    regex: MetaRegex,
    patterns: Arc<Vec<Pattern>>,
}

/// A raw hit reported by the fast matcher: a pattern index and span, with no
/// capture information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHit {
    pub pattern_index: usize,
    pub start: usize,
    pub end: usize,
}

impl CompiledMatcher {
    /// Compile every pattern's combined `(start)(pattern)(end)` source into
    /// one multi-pattern matcher.
    ///
    /// On bulk-compile failure, falls back to compiling each pattern
    /// individually so the offending pattern can be identified by `type`;
    /// the first such offender is reported.
    pub fn compile(patterns: Vec<Pattern>) -> Result<Self> {
        let sources: Vec<String> = patterns.iter().map(|p| p.regex.combined_source()).collect();

        match Self::build_many(&sources) {
            Ok(regex) => Ok(CompiledMatcher {
                regex,
                patterns: Arc::new(patterns),
            }),
            Err(_bulk_err) => {
                for (pattern, source) in patterns.iter().zip(sources.iter()) {
                    if let Err(err) = regex::Regex::new(source) {
                        return Err(Error::Compile {
                            type_label: pattern.type_label.clone(),
                            message: err.to_string(),
                        });
                    }
                }
                // Bulk compile failed but no individual pattern failed in
                // isolation: report it against the whole set.
                Err(Error::Compile {
                    type_label: "<set>".to_string(),
                    message: "bulk compile failed for a reason not reproducible per-pattern"
                        .to_string(),
                })
            }
        }
    }

    fn build_many(sources: &[String]) -> std::result::Result<MetaRegex, regex_automata::meta::BuildError> {
        MetaRegex::builder()
            .configure(MetaRegex::config().match_kind(MatchKind::LeftmostFirst))
            .build_many(sources)
    }

    /// The patterns this matcher was compiled from, in compile order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// An `Arc` clone of the pattern vector, for sharing across scan
    /// workers.
    pub fn patterns_arc(&self) -> Arc<Vec<Pattern>> {
        Arc::clone(&self.patterns)
    }

    /// Find every non-overlapping leftmost hit in `haystack`.
    ///
    /// Operates over an arbitrary byte buffer. Non-UTF-8 input simply
    /// yields no matches for patterns whose body requires valid UTF-8 at
    /// the match site; it never panics.
    pub fn find_all(&self, haystack: &[u8]) -> Vec<RawHit> {
        self.regex
            .find_iter(haystack)
            .map(Self::to_raw_hit)
            .collect()
    }

    fn to_raw_hit(m: AutomataMatch) -> RawHit {
        RawHit {
            pattern_index: m.pattern().as_usize(),
            start: m.start(),
            end: m.end(),
        }
    }
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
