// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Random fuzz mode: feed random binary and then random printable ASCII
//! through the compiled matcher to catch patterns prone to matching noise.

use std::sync::Arc;

use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::Result;
use crate::pattern::model::Pattern;
use crate::pattern::refine::FilterPolicy;
use crate::pattern::store::ResultStore;
use crate::scan::{self, Buffer};

/// Total random binary bytes fed through the matcher.
pub const BINARY_GOAL: u64 = 1024 * 1024 * 1024;

/// Total random printable-ASCII bytes fed through the matcher.
pub const ASCII_GOAL: u64 = 1024 * 1024 * 1024;

/// Size of each fuzz buffer handed to the scan engine.
pub const CHUNK_SIZE: usize = 100 * 1024 * 1024;

/// Printable ASCII range used for the ASCII phase: space through tilde.
const ASCII_MIN: u8 = 0x20;
const ASCII_MAX: u8 = 0x7e;

/// Summary of one fuzz run.
#[derive(Debug)]
pub struct FuzzSummary {
    pub binary_bytes: u64,
    pub ascii_bytes: u64,
    pub store: Arc<ResultStore>,
}

/// Run the binary phase then the ASCII phase against `patterns`, accumulating
/// hits into a single [`ResultStore`]. `seed` makes a run reproducible.
pub fn run_fuzz(patterns: Vec<Pattern>, policy: FilterPolicy, seed: u64) -> Result<FuzzSummary> {
    let store = Arc::new(ResultStore::new());
    let engine = scan::prepare(patterns, Arc::clone(&store), policy)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let binary_bytes = feed_chunks(&engine, BINARY_GOAL, || random_binary_chunk(&mut rng));
    let ascii_bytes = feed_chunks(&engine, ASCII_GOAL, || random_ascii_chunk(&mut rng));

    Ok(FuzzSummary {
        binary_bytes,
        ascii_bytes,
        store,
    })
}

fn feed_chunks(engine: &scan::ScanEngine, goal: u64, mut next_chunk: impl FnMut() -> Vec<u8>) -> u64 {
    let mut fed: u64 = 0;
    while fed < goal {
        let remaining = goal - fed;
        let mut bytes = next_chunk();
        if (bytes.len() as u64) > remaining {
            bytes.truncate(remaining as usize);
        }
        let len = bytes.len() as u64;
        let buffer = Buffer { path: None, bytes };
        engine.scan_buffer(&buffer);
        fed += len;
        if len == 0 {
            break;
        }
    }
    fed
}

fn random_binary_chunk(rng: &mut StdRng) -> Vec<u8> {
    (0..CHUNK_SIZE).map(|_| rng.r#gen::<u8>()).collect()
}

fn random_ascii_chunk(rng: &mut StdRng) -> Vec<u8> {
    (0..CHUNK_SIZE)
        .map(|_| rng.gen_range(ASCII_MIN..=ASCII_MAX))
        .collect()
}

#[cfg(test)]
#[path = "fuzz_tests.rs"]
mod tests;
