//! Command-line parsing and global-flag behavior.

use crate::prelude::*;

#[test]
fn bare_invocation_runs_fixtures_in_current_directory() {
    patternscan_cmd()
        .current_dir(fixture("basic"))
        .assert()
        .success()
        .stdout(predicates::str::contains("aws_access_key"))
        .stdout(predicates::str::contains("PASS"));
}

#[test]
fn help_exits_successfully() {
    patternscan_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("Usage:"));
}

#[test]
fn version_exits_successfully() {
    patternscan_cmd().arg("--version").assert().success();
}

#[test]
fn unknown_flag_fails_with_argument_error() {
    patternscan_cmd()
        .arg("--no-such-flag")
        .assert()
        .code(2)
        .stderr(predicates::str::is_match(r"(?i)(unexpected|unknown|unrecognized)").unwrap());
}

#[test]
fn tests_flag_points_at_an_explicit_directory() {
    patternscan_cmd()
        .args(["--tests"])
        .arg(fixture("basic"))
        .assert()
        .success()
        .stdout(predicates::str::contains("PASS"));
}

#[test]
fn quiet_suppresses_missing_and_unexpected_detail_lines() {
    patternscan_cmd()
        .args(["--tests"])
        .arg(fixture("failing"))
        .arg("--continue-on-fail")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicates::str::contains("missing expected match").not());
}
