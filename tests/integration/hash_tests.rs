use dedupe::duplicates::{DedupeConfig, DuplicateFinder};
use dedupe::report::ExecutionMode;
use dedupe::scanner::KeyStrategy;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use super::fixtures::snapshot;

const SHA256_X: &str = "4b68ab3847feda7d6c62c1fbcbeebfa35eab7351ed5e78f4ddadea5df64b8015";

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_hash_groups_identical_content() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", "X");
    write(dir.path(), "b.txt", "X");
    write(dir.path(), "c.txt", "Y");

    let report = dedupe::dedupe(&DedupeConfig::new(dir.path())).unwrap();

    assert_eq!(report.group_count(), 1);
    let group = &report.groups[0];
    assert_eq!(group.key.to_str(), Some(SHA256_X));
    assert_eq!(group.keep(), dir.path().join("a.txt"));
    assert_eq!(group.removable(), &[dir.path().join("b.txt")]);
    assert_eq!(report.to_delete(), 1);
}

#[test]
fn test_preview_leaves_files_untouched() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", "X");
    write(dir.path(), "b.txt", "X");
    write(dir.path(), "c.txt", "Y");
    fs::create_dir(dir.path().join("sub")).unwrap();
    write(&dir.path().join("sub"), "d.txt", "X");
    let before = snapshot(dir.path());

    let config = DedupeConfig::new(dir.path())
        .with_recursive(true)
        .with_mode(ExecutionMode::Preview);
    let report = dedupe::dedupe(&config).unwrap();

    assert!(report.preview_mode);
    assert_eq!(report.to_delete(), 2);
    assert!(report.removal_outcomes.is_empty());
    assert_eq!(snapshot(dir.path()), before);
}

#[test]
fn test_unique_files_produce_no_groups() {
    let dir = tempdir().unwrap();
    write(dir.path(), "one", "1");
    write(dir.path(), "two", "2");
    write(dir.path(), "three", "3");

    let report = dedupe::dedupe(&DedupeConfig::new(dir.path())).unwrap();

    assert_eq!(report.group_count(), 0);
    assert_eq!(report.to_delete(), 0);
}

#[test]
fn test_empty_directory() {
    let dir = tempdir().unwrap();

    let report = dedupe::dedupe(&DedupeConfig::new(dir.path())).unwrap();

    assert_eq!(report.group_count(), 0);
    assert_eq!(report.skipped, 0);
}

#[test]
fn test_empty_files_are_duplicates() {
    let dir = tempdir().unwrap();
    write(dir.path(), "empty1", "");
    write(dir.path(), "empty2", "");

    let report = dedupe::dedupe(&DedupeConfig::new(dir.path())).unwrap();

    assert_eq!(report.group_count(), 1);
    assert_eq!(
        report.groups[0].key.to_str(),
        Some("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
    );
}

#[test]
fn test_flat_walk_ignores_subdirectories() {
    let dir = tempdir().unwrap();
    write(dir.path(), "top.txt", "same");
    fs::create_dir(dir.path().join("sub")).unwrap();
    write(&dir.path().join("sub"), "nested.txt", "same");

    let flat = dedupe::dedupe(&DedupeConfig::new(dir.path())).unwrap();
    assert_eq!(flat.group_count(), 0);

    let recursive =
        dedupe::dedupe(&DedupeConfig::new(dir.path()).with_recursive(true)).unwrap();
    assert_eq!(recursive.group_count(), 1);
}

#[test]
fn test_keep_is_first_in_walk_order() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("a")).unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    write(&dir.path().join("b"), "copy", "payload");
    write(&dir.path().join("a"), "z_original", "payload");
    write(dir.path(), "c.txt", "payload");

    let report =
        dedupe::dedupe(&DedupeConfig::new(dir.path()).with_recursive(true)).unwrap();

    let group = &report.groups[0];
    assert_eq!(group.keep(), dir.path().join("a").join("z_original"));
    assert_eq!(
        group.removable(),
        &[dir.path().join("b").join("copy"), dir.path().join("c.txt")]
    );
}

#[test]
fn test_thread_count_does_not_change_result() {
    let dir = tempdir().unwrap();
    for i in 0..40 {
        write(dir.path(), &format!("file_{:02}", i), &format!("content {}", i % 7));
    }

    let single = DuplicateFinder::new(DedupeConfig::new(dir.path()).with_io_threads(1))
        .find()
        .unwrap()
        .0;
    let many = DuplicateFinder::new(DedupeConfig::new(dir.path()).with_io_threads(8))
        .find()
        .unwrap()
        .0;

    assert_eq!(single, many);
    assert_eq!(single.len(), 7);
}

#[test]
fn test_summary_counts() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a", "dup");
    write(dir.path(), "b", "dup");
    write(dir.path(), "c", "dup");
    write(dir.path(), "d", "unique");

    let (groups, summary) = DuplicateFinder::new(
        DedupeConfig::new(dir.path()).with_key_strategy(KeyStrategy::Hash),
    )
    .find()
    .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(summary.total_files, 4);
    assert_eq!(summary.keyed_files, 4);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.duplicate_groups, 1);
    assert_eq!(summary.duplicate_files, 2);
}
