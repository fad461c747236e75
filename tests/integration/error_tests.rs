use dedupe::duplicates::{DedupeConfig, FinderError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_root_is_fatal() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let result = dedupe::dedupe(&DedupeConfig::new(&missing));

    assert!(matches!(result, Err(FinderError::PathNotFound(p)) if p == missing));
}

#[test]
fn test_root_must_be_directory() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, "content").unwrap();

    let result = dedupe::dedupe(&DedupeConfig::new(&file));

    assert!(matches!(result, Err(FinderError::NotADirectory(_))));
}

#[test]
fn test_error_messages_name_the_path() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("gone");

    let err = dedupe::dedupe(&DedupeConfig::new(&missing)).unwrap_err();

    assert!(err.to_string().contains("gone"));
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_grouped() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target.txt");
    fs::write(&target, "linked").unwrap();
    std::os::unix::fs::symlink(&target, dir.path().join("link.txt")).unwrap();

    let report = dedupe::dedupe(&DedupeConfig::new(dir.path())).unwrap();

    assert_eq!(report.group_count(), 0);
}
