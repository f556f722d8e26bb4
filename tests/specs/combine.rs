//! `combine` subcommand: merging every `patterns.yml` under a directory
//! into one filtered YAML document, verbatim, with no compiling or
//! scanning involved.

use crate::prelude::*;

#[test]
fn combine_merges_every_bundle_under_the_root() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("a")).unwrap();
    std::fs::create_dir_all(root.path().join("b")).unwrap();
    std::fs::write(
        root.path().join("a").join("patterns.yml"),
        "name: bundle a\npatterns:\n  - name: pattern_a\n    regex:\n      pattern: \"A[0-9]+\"\n",
    )
    .unwrap();
    std::fs::write(
        root.path().join("b").join("patterns.yml"),
        "name: bundle b\npatterns:\n  - name: pattern_b\n    regex:\n      pattern: \"B[0-9]+\"\n",
    )
    .unwrap();

    let out = root.path().join("combined.yml");
    patternscan_cmd()
        .arg("combine")
        .arg(root.path())
        .args(["-o"])
        .arg(&out)
        .assert()
        .success();

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("pattern_a"));
    assert!(written.contains("pattern_b"));
    assert!(written.contains("Collection of custom patterns"));
}

#[test]
fn combine_excludes_patterns_by_name_glob() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(
        root.path().join("patterns.yml"),
        "name: bundle\npatterns:\n  - name: keep_me\n    regex:\n      pattern: \"A[0-9]+\"\n  - name: drop_me\n    regex:\n      pattern: \"B[0-9]+\"\n",
    )
    .unwrap();

    let out = root.path().join("combined.yml");
    patternscan_cmd()
        .arg("combine")
        .arg(root.path())
        .args(["-o"])
        .arg(&out)
        .args(["--exclude-name", "drop_me"])
        .assert()
        .success();

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("keep_me"));
    assert!(!written.contains("drop_me"));
}
