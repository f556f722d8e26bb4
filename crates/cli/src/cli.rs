// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Validates custom secret-scanning regex patterns against fixtures, or
/// scans arbitrary content with them.
#[derive(Parser)]
#[command(name = "patternscan")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Root directory to run fixture tests against (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub tests: Option<PathBuf>,

    /// External directory to dry-run scan
    #[arg(long, value_name = "DIR")]
    pub extra: Option<PathBuf>,

    /// Feed random binary then random printable ASCII through the matcher
    #[arg(long)]
    pub random: bool,

    /// List file of `owner/name` repositories to clone and dry-run scan
    #[arg(long, value_name = "FILE")]
    pub repos: Option<PathBuf>,

    /// Keep only patterns whose type matches one of these globs
    #[arg(long = "include", value_name = "GLOB")]
    pub include: Vec<String>,

    /// Drop patterns whose type matches one of these globs
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Keep only patterns whose name matches one of these globs
    #[arg(long = "include-name", value_name = "GLOB")]
    pub include_name: Vec<String>,

    /// Drop patterns whose name matches one of these globs
    #[arg(long = "exclude-name", value_name = "GLOB")]
    pub exclude_name: Vec<String>,

    /// Dry-run report prints just the secret fragment, not the surrounding line
    #[arg(long)]
    pub only_match: bool,

    /// Disable `additional_match` / `additional_not_match` filtering
    #[arg(long)]
    pub no_additional_matches: bool,

    /// Disable the warning for patterns with many additional-match entries
    #[arg(long)]
    pub no_warn_on_additional_matches_number: bool,

    /// Warning threshold for combined additional-match/not-match entries (default: 5)
    #[arg(long, value_name = "N")]
    pub additional_matches_limit: Option<usize>,

    /// Warn if any additional_match/additional_not_match anchors with ^ or $
    #[arg(long)]
    pub lt_ghes_3_8: bool,

    /// Keep running after a fixture failure instead of stopping at exit code 1
    #[arg(long)]
    pub continue_on_fail: bool,

    /// Print progress as each pattern set is processed
    #[arg(long)]
    pub progress: bool,

    /// Suppress informational and warning output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Elevate "expected match observed" reports from debug to info
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Enable debug-level logging
    #[arg(long)]
    pub debug: bool,

    /// Optional TOML run-configuration file
    #[arg(short = 'C', long = "config", env = "PATTERNSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Emit a single filtered pattern document for bulk upload
    Combine(CombineArgs),
}

#[derive(clap::Args)]
pub struct CombineArgs {
    /// Root directory to walk for patterns.yml files
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// File to write the combined YAML document to
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
