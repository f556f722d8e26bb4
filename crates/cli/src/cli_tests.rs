#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn parse_bare_invocation() {
    let cli = Cli::parse_from(["patternscan"]);
    assert!(cli.command.is_none());
    assert!(cli.tests.is_none());
    assert!(!cli.random);
}

#[test]
fn parse_tests_flag() {
    let cli = Cli::parse_from(["patternscan", "--tests", "fixtures/"]);
    assert_eq!(cli.tests, Some(PathBuf::from("fixtures/")));
}

#[test]
fn parse_repeated_include_exclude_globs() {
    let cli = Cli::parse_from([
        "patternscan",
        "--include",
        "aws_*",
        "--include",
        "gcp_*",
        "--exclude",
        "*_test",
    ]);
    assert_eq!(cli.include, vec!["aws_*".to_string(), "gcp_*".to_string()]);
    assert_eq!(cli.exclude, vec!["*_test".to_string()]);
}

#[test]
fn parse_combine_subcommand() {
    let cli = Cli::parse_from(["patternscan", "combine", "patterns/", "-o", "out.yml"]);
    match cli.command {
        Some(Command::Combine(args)) => {
            assert_eq!(args.dir, PathBuf::from("patterns/"));
            assert_eq!(args.output, PathBuf::from("out.yml"));
        }
        _ => panic!("expected combine command"),
    }
}

#[test]
fn parse_additional_matches_limit() {
    let cli = Cli::parse_from(["patternscan", "--additional-matches-limit", "10"]);
    assert_eq!(cli.additional_matches_limit, Some(10));
}

#[test]
fn parse_quiet_verbose_debug_flags() {
    let cli = Cli::parse_from(["patternscan", "--quiet", "--verbose", "--debug"]);
    assert!(cli.quiet);
    assert!(cli.verbose);
    assert!(cli.debug);
}
