#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use std::fs;
use tempfile::TempDir;

fn create_test_tree(dir: &Path) {
    fs::create_dir_all(dir.join("src")).unwrap();
    fs::write(dir.join("src/lib.rs"), "fn main() {}").unwrap();
    fs::write(dir.join("src/test.rs"), "fn test() {}").unwrap();
}

#[test]
fn walks_simple_directory() {
    let tmp = TempDir::new().unwrap();
    create_test_tree(tmp.path());

    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        ..Default::default()
    });
    let (files, stats) = walker.walk_collect(tmp.path());

    assert_eq!(files.len(), 2);
    assert_eq!(stats.files_found, 2);
}

#[test]
fn gitignore_disabled_by_default_for_pattern_bundle_trees() {
    let tmp = TempDir::new().unwrap();
    create_test_tree(tmp.path());

    fs::write(tmp.path().join(".gitignore"), "*.rs\n").unwrap();
    fs::create_dir(tmp.path().join(".git")).unwrap();

    // Loader and dry-run walks always construct WalkerConfig with
    // git_ignore: false, since fixture trees and scanned content are not
    // the caller's own gitignored build output.
    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        ..Default::default()
    });
    let (files, _) = walker.walk_collect(tmp.path());

    assert_eq!(files.len(), 2, "gitignore must not filter pattern bundle files");
}

#[test]
fn respects_depth_limit() {
    let tmp = TempDir::new().unwrap();

    let deep = tmp.path().join("level1/level2/level3");
    fs::create_dir_all(&deep).unwrap();
    fs::write(deep.join("file.rs"), "fn f() {}").unwrap();

    fs::write(tmp.path().join("shallow.rs"), "fn s() {}").unwrap();

    let walker = FileWalker::new(WalkerConfig {
        max_depth: Some(2),
        git_ignore: false,
        hidden: false,
        ..Default::default()
    });
    let (files, _) = walker.walk_collect(tmp.path());

    assert_eq!(files.len(), 1);
    assert!(files[0].path.ends_with("shallow.rs"));
}

#[test]
fn custom_exclude_patterns() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("src")).unwrap();
    fs::write(tmp.path().join("src/lib.rs"), "fn main() {}").unwrap();
    fs::write(tmp.path().join("src/test.snapshot"), "snapshot").unwrap();

    let walker = FileWalker::new(WalkerConfig {
        exclude_patterns: vec!["*.snapshot".to_string()],
        git_ignore: false,
        hidden: false,
        ..Default::default()
    });
    let (files, _) = walker.walk_collect(tmp.path());

    assert!(
        files
            .iter()
            .all(|f| !f.path.to_string_lossy().contains(".snapshot")),
        "expected no .snapshot files but found: {:?}",
        files.iter().map(|f| &f.path).collect::<Vec<_>>()
    );
}

#[test]
fn skips_dot_git_directory_entirely() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".git/objects")).unwrap();
    fs::write(tmp.path().join(".git/objects/pack"), "binary").unwrap();
    fs::write(tmp.path().join("README.md"), "hello").unwrap();

    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        hidden: false,
        ..Default::default()
    });
    let (files, _) = walker.walk_collect(tmp.path());

    assert_eq!(files.len(), 1);
    assert!(files[0].path.ends_with("README.md"));
}

#[test]
fn collects_file_size() {
    let tmp = TempDir::new().unwrap();
    let content = "hello world";
    fs::write(tmp.path().join("file.txt"), content).unwrap();

    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        hidden: false,
        ..Default::default()
    });
    let (files, _) = walker.walk_collect(tmp.path());

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].size, content.len() as u64);
}

#[test]
fn tracks_file_depth() {
    let tmp = TempDir::new().unwrap();

    fs::create_dir_all(tmp.path().join("a/b")).unwrap();
    fs::write(tmp.path().join("root.txt"), "root").unwrap();
    fs::write(tmp.path().join("a/level1.txt"), "level1").unwrap();
    fs::write(tmp.path().join("a/b/level2.txt"), "level2").unwrap();

    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        hidden: false,
        ..Default::default()
    });
    let (files, _) = walker.walk_collect(tmp.path());

    assert_eq!(files.len(), 3);

    let mut files = files;
    files.sort_by_key(|f| f.depth);

    assert_eq!(files[0].depth, 1);
    assert_eq!(files[1].depth, 2);
    assert_eq!(files[2].depth, 3);
}

#[test]
fn handles_empty_directory() {
    let tmp = TempDir::new().unwrap();

    let walker = FileWalker::new(WalkerConfig {
        git_ignore: false,
        ..Default::default()
    });
    let (files, stats) = walker.walk_collect(tmp.path());

    assert!(files.is_empty());
    assert_eq!(stats.files_found, 0);
    assert_eq!(stats.errors, 0);
}
