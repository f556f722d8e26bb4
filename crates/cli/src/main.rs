// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `patternscan` CLI entry point.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use patternscan::cli::{Cli, Command};
use patternscan::color::{is_no_color_env, resolve_color, scheme};
use patternscan::error::{Error, ExitCode};
use patternscan::pattern::loader::{
    DEFAULT_ADDITIONAL_MATCHES_LIMIT, GlobFilter, PatternFilter, load_pattern_sets,
    warn_on_additional_matches_number, warn_on_lt_ghes_3_8_anchors,
};
use patternscan::pattern::model::Pattern;
use patternscan::pattern::refine::FilterPolicy;
use patternscan::pattern::store::ResultStore;
use patternscan::platform;
use patternscan::{config, git, modes};

fn init_logging(cli: &Cli) {
    let filter = if let Ok(filter) = EnvFilter::try_from_env("PATTERNSCAN_LOG") {
        filter
    } else if cli.debug {
        EnvFilter::new("debug")
    } else if cli.verbose {
        EnvFilter::new("info")
    } else if cli.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::new("warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("patternscan: {err}");
            ExitCode::from(&err)
        }
    };

    std::process::exit(exit_code as i32);
}

/// Resolve the optional run-configuration file, falling back to defaults.
fn load_config(cli: &Cli) -> Result<config::Config, Error> {
    match &cli.config {
        Some(path) => config::load(path),
        None => Ok(config::Config::default()),
    }
}

/// CLI flags win over the run-configuration file's defaults for the glob
/// lists; an empty CLI list means "use the file's default".
fn effective_globs(cli_globs: &[String], config_globs: &[String]) -> Vec<String> {
    if cli_globs.is_empty() {
        config_globs.to_vec()
    } else {
        cli_globs.to_vec()
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    platform::check()?;

    let config = load_config(cli)?;

    let include = effective_globs(&cli.include, &config.include);
    let exclude = effective_globs(&cli.exclude, &config.exclude);
    let include_name = effective_globs(&cli.include_name, &config.include_name);
    let exclude_name = effective_globs(&cli.exclude_name, &config.exclude_name);

    let filter = PatternFilter {
        type_filter: GlobFilter::build(&include, &exclude)
            .map_err(|e| Error::Argument(e.to_string()))?,
        name_filter: GlobFilter::build(&include_name, &exclude_name)
            .map_err(|e| Error::Argument(e.to_string()))?,
    };

    if let Some(Command::Combine(args)) = &cli.command {
        let outcome = modes::run_combine(&args.dir, &filter)?;
        std::fs::write(&args.output, &outcome.document).map_err(|e| Error::Io {
            path: args.output.clone(),
            source: e,
        })?;
        eprintln!(
            "combine: {} pattern file(s) visited, {} pattern(s) kept, written to {}",
            outcome.files_visited,
            outcome.patterns_kept,
            args.output.display()
        );
        return Ok(ExitCode::Success);
    }

    let policy = FilterPolicy {
        apply_additional_matches: !cli.no_additional_matches,
    };

    let limit = cli
        .additional_matches_limit
        .unwrap_or_else(|| config.additional_matches_limit());

    let tests_root = cli
        .tests
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let sets = load_pattern_sets(&tests_root, &filter);
    let union: Vec<Pattern> = sets.values().flat_map(|set| set.patterns.clone()).collect();

    if !cli.no_warn_on_additional_matches_number {
        for pattern in &union {
            warn_on_additional_matches_number(pattern, limit);
        }
    }
    if cli.lt_ghes_3_8 {
        for pattern in &union {
            warn_on_lt_ghes_3_8_anchors(pattern);
        }
    }

    let fixture_outcomes = modes::run_fixture_tests(&tests_root, &filter, policy)?;
    report_fixtures(&fixture_outcomes, cli)?;

    if let Some(extra) = &cli.extra {
        let summary = modes::run_dry_run(extra, union.clone(), policy)?;
        report_dry_run("dry-run", extra, &summary.store, summary.files_scanned, summary.bytes_scanned, cli)?;
    }

    if cli.random {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let summary = modes::run_fuzz(union.clone(), policy, seed)?;
        eprintln!(
            "fuzz: {} binary byte(s), {} ascii byte(s) fed, {} total hit(s)",
            summary.binary_bytes,
            summary.ascii_bytes,
            summary.store.total_count()
        );
    }

    if let Some(repo_list_path) = &cli.repos {
        let content = std::fs::read_to_string(repo_list_path).map_err(|e| Error::Io {
            path: repo_list_path.clone(),
            source: e,
        })?;
        let repos = git::parse_repo_list(&content);
        let cache_root = config
            .clone_cache_root
            .clone()
            .unwrap_or_else(git::default_cache_root);
        let (outcomes, store) = modes::run_repo_clone(&repos, &cache_root, &union, policy)?;
        for outcome in &outcomes {
            eprintln!(
                "repo-clone: {}/{}: {} file(s), {} byte(s) scanned",
                outcome.repo.owner, outcome.repo.name, outcome.files_scanned, outcome.bytes_scanned
            );
        }
        eprintln!("repo-clone: {} total hit(s) across {} repo(s)", store.total_count(), outcomes.len());
    }

    let fixtures_failed = fixture_outcomes.iter().any(|o| !o.passed());
    if fixtures_failed && !cli.continue_on_fail {
        Ok(ExitCode::CheckFailed)
    } else {
        Ok(ExitCode::Success)
    }
}

fn report_fixtures(outcomes: &[modes::FixtureOutcome], cli: &Cli) -> Result<(), Error> {
    use termcolor::{ColorChoice, StandardStream, WriteColor};

    let color_choice = resolve_color(false, is_no_color_env());
    let mut stdout = StandardStream::stdout(color_choice);

    for outcome in outcomes {
        if cli.progress {
            eprintln!("testing {} ({})", outcome.set_name, outcome.source_path);
        }
        for verdict in &outcome.verdicts {
            stdout.set_color(&scheme::pattern_type()).ok();
            write!(stdout, "{}", verdict.type_label).ok();
            stdout.reset().ok();

            if verdict.informational {
                stdout.set_color(&scheme::skip()).ok();
                write!(stdout, " SKIP").ok();
            } else if verdict.passed() {
                stdout.set_color(&scheme::pass()).ok();
                write!(stdout, " PASS").ok();
            } else {
                stdout.set_color(&scheme::fail()).ok();
                write!(stdout, " FAIL").ok();
            }
            stdout.reset().ok();
            writeln!(stdout).ok();

            if !cli.quiet {
                for missing in &verdict.missing {
                    writeln!(
                        stdout,
                        "  missing expected match: {} [{}, {})",
                        missing.name, missing.start_offset, missing.end_offset
                    )
                    .ok();
                }
                for unexpected in &verdict.unexpected {
                    writeln!(
                        stdout,
                        "  unexpected match: {:?} [{}, {})",
                        unexpected.file_path, unexpected.start_offset, unexpected.end_offset
                    )
                    .ok();
                }
            }
        }
    }

    Ok(())
}

fn report_dry_run(
    label: &str,
    root: &Path,
    store: &ResultStore,
    files_scanned: usize,
    bytes_scanned: u64,
    cli: &Cli,
) -> Result<(), Error> {
    use termcolor::{ColorChoice, StandardStream, WriteColor};

    if cli.quiet {
        return Ok(());
    }

    let color_choice = resolve_color(false, is_no_color_env());
    let mut stdout = StandardStream::stdout(color_choice);

    for (type_label, count) in store.counts_by_pattern() {
        if count == 0 {
            continue;
        }
        for hit in store.matches_for(&type_label) {
            if cli.only_match {
                stdout.set_color(&scheme::secret_fragment()).ok();
                write!(stdout, "{}", hit.captured.pattern).ok();
                stdout.reset().ok();
                writeln!(stdout).ok();
            } else {
                stdout.set_color(&scheme::path()).ok();
                write!(stdout, "{}", hit.file_path.as_deref().unwrap_or("<buffer>")).ok();
                stdout.reset().ok();
                stdout.set_color(&scheme::line_number()).ok();
                write!(stdout, ":{}", hit.start_offset).ok();
                stdout.reset().ok();
                write!(stdout, " [{}] ", type_label).ok();
                stdout.set_color(&scheme::secret_fragment()).ok();
                write!(stdout, "{}", hit.captured.pattern).ok();
                stdout.reset().ok();
                writeln!(stdout).ok();
            }
        }
    }

    eprintln!(
        "{label}: {} file(s), {bytes_scanned} byte(s) scanned under {}, {} total hit(s)",
        files_scanned,
        root.display(),
        store.total_count()
    );

    Ok(())
}
