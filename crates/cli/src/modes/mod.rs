// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run modes: fixture test, external dry-run scan, random-bytes fuzz,
//! repo-clone scan, and pattern-set combine.
//!
//! Each mode is a thin driver over the engine in [`crate::pattern`]: it
//! decides which buffers to feed the [`crate::scan::ScanEngine`] and what to
//! do with the [`crate::pattern::store::ResultStore`] afterward. None of
//! them hold state beyond one call — accumulation across calls (repo-clone)
//! is the caller's responsibility, by reusing one [`crate::pattern::store::ResultStore`].

pub mod combine;
pub mod dryrun;
pub mod fixture;
pub mod fuzz;
pub mod repoclone;

pub use combine::{CombineOutcome, run_combine};
pub use dryrun::{DryRunSummary, run_dry_run};
pub use fixture::{FixtureOutcome, run_fixture_tests};
pub use fuzz::{FuzzSummary, run_fuzz};
pub use repoclone::{RepoCloneOutcome, run_repo_clone};
