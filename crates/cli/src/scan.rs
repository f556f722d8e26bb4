//! Drives the compiled matcher across independent byte buffers, fanning
//! work out across a thread pool and dispatching each hit through the
//! refinement stage into the shared result store.
//!
//! Concurrency model: one buffer (one file, or one fixed-size fuzz chunk)
//! per worker-pool task. Within a single buffer's scan, the matcher invokes
//! the refinement callback synchronously on that worker; the refinement
//! callback writes straight into the mutex-guarded [`ResultStore`]. No
//! suspension points occur inside the matcher callback — file reads happen
//! before a buffer is handed to the scan engine, never interleaved with
//! another worker's callback.

use std::sync::Arc;

use rayon::prelude::*;

use crate::error::Result;
use crate::pattern::compiler::CompiledMatcher;
use crate::pattern::model::Pattern;
use crate::pattern::refine::{self, FilterPolicy, Refiner};
use crate::pattern::store::ResultStore;

/// One independent unit of work: a byte buffer with an optional associated
/// file path (used for reporting and for the Reconciler's basename
/// equality rule).
pub struct Buffer {
    pub path: Option<String>,
    pub bytes: Vec<u8>,
}

/// Drives a compiled matcher and its per-pattern refiners across buffers.
pub struct ScanEngine {
    matcher: Arc<CompiledMatcher>,
    refiners: Arc<Vec<Refiner>>,
    store: Arc<ResultStore>,
    policy: FilterPolicy,
}

impl ScanEngine {
    pub fn new(
        matcher: Arc<CompiledMatcher>,
        refiners: Arc<Vec<Refiner>>,
        store: Arc<ResultStore>,
        policy: FilterPolicy,
    ) -> Self {
        ScanEngine {
            matcher,
            refiners,
            store,
            policy,
        }
    }

    /// Scan one buffer, recording every refined match into the store.
    /// Refinement failures are logged and skipped; they do not abort the
    /// scan of the remaining hits in this buffer.
    pub fn scan_buffer(&self, buffer: &Buffer) {
        let hits = self.matcher.find_all(&buffer.bytes);
        let patterns = self.matcher.patterns();

        for hit in hits {
            let Some(refiner) = self.refiners.get(hit.pattern_index) else {
                tracing::error!(
                    pattern_index = hit.pattern_index,
                    "raw hit referenced a pattern index outside the compiled vector"
                );
                continue;
            };
            let pattern = &patterns[hit.pattern_index];

            match refiner.refine(hit, &buffer.bytes, hit.pattern_index, buffer.path.as_deref(), self.policy) {
                Ok(Some(m)) => self.store.record(&pattern.name, m),
                Ok(None) => {
                    tracing::debug!(
                        pattern = %pattern.type_label,
                        file = ?buffer.path,
                        "match suppressed by additional-match filters"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        pattern = %pattern.type_label,
                        file = ?buffer.path,
                        error = %err,
                        "refinement failed for a raw hit"
                    );
                }
            }
        }
    }

    /// Scan many independent buffers concurrently across a thread pool
    /// sized to the available cores. Returns once every buffer has been
    /// scanned (a join/barrier before the caller reconciles).
    pub fn scan_all(&self, buffers: &[Buffer]) {
        buffers.par_iter().for_each(|buffer| self.scan_buffer(buffer));
    }

    /// The compiled matcher's patterns, for callers that need to reconcile
    /// or report against them after scanning.
    pub fn patterns(&self) -> &[Pattern] {
        self.matcher.patterns()
    }
}

/// Compile a pattern vector into a ready-to-use [`ScanEngine`]: the fast
/// multi-pattern matcher plus one [`Refiner`] per pattern, in the same
/// order so the raw matcher's `pattern_index` can dereference either.
pub fn prepare(
    patterns: Vec<Pattern>,
    store: Arc<ResultStore>,
    policy: FilterPolicy,
) -> Result<ScanEngine> {
    let matcher = CompiledMatcher::compile(patterns)?;
    let refiners = refine::compile_all(matcher.patterns())?;
    Ok(ScanEngine::new(
        Arc::new(matcher),
        Arc::new(refiners),
        store,
        policy,
    ))
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
