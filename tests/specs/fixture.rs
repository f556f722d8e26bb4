//! Fixture-test mode: reconciling declared expectations against scans of
//! the files sitting next to each `patterns.yml`.

use crate::prelude::*;

#[test]
fn passing_bundle_exits_zero_and_reports_pass() {
    patternscan_cmd()
        .args(["--tests"])
        .arg(fixture("basic"))
        .assert()
        .success()
        .stdout(predicates::str::contains("aws_access_key PASS"));
}

#[test]
fn failing_bundle_exits_nonzero_by_default() {
    patternscan_cmd()
        .args(["--tests"])
        .arg(fixture("failing"))
        .assert()
        .code(1)
        .stdout(predicates::str::contains("FAIL"))
        .stdout(predicates::str::contains("missing expected match"));
}

#[test]
fn continue_on_fail_still_reports_failure_but_exits_zero() {
    patternscan_cmd()
        .args(["--tests"])
        .arg(fixture("failing"))
        .arg("--continue-on-fail")
        .assert()
        .success()
        .stdout(predicates::str::contains("FAIL"));
}

#[test]
fn excluding_the_only_pattern_by_name_skips_it_entirely() {
    patternscan_cmd()
        .args(["--tests"])
        .arg(fixture("basic"))
        .args(["--exclude-name", "aws_access_key"])
        .assert()
        .success()
        .stdout(predicates::str::contains("aws_access_key").not());
}

#[test]
fn ad_hoc_bundle_with_no_expectations_is_informational_only() {
    let bundle = TempBundle::new(
        r#"name: scratch bundle
patterns:
  - name: scratch_pattern
    regex:
      pattern: "ZZZ[0-9]{4}"
"#,
    );
    bundle.write_fixture("sample.txt", b"nothing to see here\n");

    patternscan_cmd()
        .args(["--tests"])
        .arg(bundle.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("SKIP"));
}
