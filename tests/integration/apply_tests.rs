use dedupe::actions::ExecutionEngine;
use dedupe::duplicates::{DedupeConfig, DuplicateFinder};
use dedupe::report::ExecutionMode;
use dedupe::scanner::KeyStrategy;
use std::fs;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn test_apply_removes_all_but_first() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "X").unwrap();
    fs::write(dir.path().join("b.txt"), "X").unwrap();
    fs::write(dir.path().join("c.txt"), "Y").unwrap();

    let config = DedupeConfig::new(dir.path()).with_mode(ExecutionMode::Apply);
    let report = dedupe::dedupe(&config).unwrap();

    assert!(!report.preview_mode);
    assert_eq!(report.removed_count(), 1);
    assert_eq!(report.failed_count(), 0);
    assert!(dir.path().join("a.txt").exists());
    assert!(!dir.path().join("b.txt").exists());
    assert!(dir.path().join("c.txt").exists());
}

#[test]
fn test_second_apply_is_a_no_op() {
    let dir = tempdir().unwrap();
    for name in ["1", "2", "3", "4"] {
        fs::write(dir.path().join(name), "same").unwrap();
    }

    let config = DedupeConfig::new(dir.path()).with_mode(ExecutionMode::Apply);
    let first = dedupe::dedupe(&config).unwrap();
    assert_eq!(first.removed_count(), 3);

    let second = dedupe::dedupe(&config).unwrap();
    assert_eq!(second.group_count(), 0);
    assert!(second.removal_outcomes.is_empty());
    assert!(dir.path().join("1").exists());
}

#[test]
fn test_apply_continues_after_external_deletion() {
    let dir = tempdir().unwrap();
    for name in ["a", "b", "c"] {
        fs::write(dir.path().join(name), "payload").unwrap();
    }

    let (groups, _) = DuplicateFinder::new(DedupeConfig::new(dir.path()))
        .find()
        .unwrap();

    // Another process removes a member between planning and execution
    fs::remove_file(dir.path().join("b")).unwrap();

    let report = ExecutionEngine::new(ExecutionMode::Apply).execute(
        dir.path(),
        KeyStrategy::Hash,
        groups,
    );

    assert_eq!(report.removal_outcomes.len(), 2);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.removed_count(), 1);
    assert!(!report.removal_outcomes[0].removed);
    assert!(report.removal_outcomes[0].error.is_some());
    assert!(report.removal_outcomes[1].removed);
    assert!(dir.path().join("a").exists());
    assert!(!dir.path().join("c").exists());
}

#[test]
fn test_apply_never_removes_kept_member() {
    let dir = tempdir().unwrap();
    for i in 0..5 {
        let sub = dir.path().join(format!("d{}", i));
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("x.bin"), "twin").unwrap();
        fs::write(sub.join("y.bin"), format!("unique {}", i)).unwrap();
    }

    let config = DedupeConfig::new(dir.path())
        .with_recursive(true)
        .with_mode(ExecutionMode::Apply);
    let report = dedupe::dedupe(&config).unwrap();

    assert_eq!(report.removed_count(), 4);
    assert!(dir.path().join("d0").join("x.bin").exists());
    for i in 0..5 {
        assert!(dir.path().join(format!("d{}", i)).join("y.bin").exists());
    }
}

#[test]
fn test_shutdown_before_scan_reports_interrupted() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "1").unwrap();
    fs::write(dir.path().join("b"), "1").unwrap();

    let flag = Arc::new(AtomicBool::new(true));
    let config = DedupeConfig::new(dir.path())
        .with_mode(ExecutionMode::Apply)
        .with_shutdown_flag(flag);

    let result = dedupe::dedupe(&config);

    assert!(matches!(
        result,
        Err(dedupe::duplicates::FinderError::Interrupted)
    ));
    assert!(dir.path().join("a").exists());
    assert!(dir.path().join("b").exists());
}
