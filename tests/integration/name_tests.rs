use dedupe::duplicates::DedupeConfig;
use dedupe::scanner::KeyStrategy;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_name_groups_across_directories() {
    let dir = tempdir().unwrap();
    let dir1 = dir.path().join("dir1");
    let dir2 = dir.path().join("dir2");
    fs::create_dir(&dir1).unwrap();
    fs::create_dir(&dir2).unwrap();
    fs::write(dir1.join("img.jpg"), "first picture").unwrap();
    fs::write(dir2.join("img.jpg"), "a different picture").unwrap();

    let config = DedupeConfig::new(dir.path())
        .with_key_strategy(KeyStrategy::Name)
        .with_recursive(true);
    let report = dedupe::dedupe(&config).unwrap();

    assert_eq!(report.group_count(), 1);
    let group = &report.groups[0];
    assert_eq!(group.key.to_str(), Some("img.jpg"));
    assert_eq!(group.keep(), dir1.join("img.jpg"));
    assert_eq!(group.removable(), &[dir2.join("img.jpg")]);
}

#[test]
fn test_name_flat_walk_sees_no_subdirectories() {
    let dir = tempdir().unwrap();
    let dir1 = dir.path().join("dir1");
    let dir2 = dir.path().join("dir2");
    fs::create_dir(&dir1).unwrap();
    fs::create_dir(&dir2).unwrap();
    fs::write(dir1.join("img.jpg"), "x").unwrap();
    fs::write(dir2.join("img.jpg"), "x").unwrap();

    let config = DedupeConfig::new(dir.path()).with_key_strategy(KeyStrategy::Name);
    let report = dedupe::dedupe(&config).unwrap();

    assert_eq!(report.group_count(), 0);
}

#[test]
fn test_name_ignores_content() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("same.txt"), "one").unwrap();
    fs::write(dir.path().join("other.txt"), "one").unwrap();

    let by_name = dedupe::dedupe(
        &DedupeConfig::new(dir.path()).with_key_strategy(KeyStrategy::Name),
    )
    .unwrap();
    let by_hash = dedupe::dedupe(&DedupeConfig::new(dir.path())).unwrap();

    assert_eq!(by_name.group_count(), 0);
    assert_eq!(by_hash.group_count(), 1);
}

#[test]
fn test_name_is_case_sensitive() {
    let dir = tempdir().unwrap();
    let upper = dir.path().join("upper");
    let lower = dir.path().join("lower");
    fs::create_dir(&upper).unwrap();
    fs::create_dir(&lower).unwrap();
    fs::write(upper.join("README"), "a").unwrap();
    fs::write(lower.join("readme"), "a").unwrap();

    let config = DedupeConfig::new(dir.path())
        .with_key_strategy(KeyStrategy::Name)
        .with_recursive(true);
    let report = dedupe::dedupe(&config).unwrap();

    assert_eq!(report.group_count(), 0);
}

#[cfg(unix)]
#[test]
fn test_name_keys_keep_non_utf8_names_apart() {
    use dedupe::report::ExecutionMode;
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempdir().unwrap();
    let a = dir.path().join(OsStr::from_bytes(b"photo\xff.jpg"));
    let b = dir.path().join(OsStr::from_bytes(b"photo\xfe.jpg"));
    fs::write(&a, "one").unwrap();
    fs::write(&b, "two").unwrap();

    let config = DedupeConfig::new(dir.path())
        .with_key_strategy(KeyStrategy::Name)
        .with_mode(ExecutionMode::Apply);
    let report = dedupe::dedupe(&config).unwrap();

    assert_eq!(report.group_count(), 0);
    assert!(report.removal_outcomes.is_empty());
    assert!(a.exists());
    assert!(b.exists());
}

#[cfg(unix)]
#[test]
fn test_name_keys_group_identical_non_utf8_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempdir().unwrap();
    let name = OsStr::from_bytes(b"scan\xff.png");
    for sub in ["x", "y"] {
        let sub = dir.path().join(sub);
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join(name), sub.to_string_lossy().as_bytes()).unwrap();
    }

    let config = DedupeConfig::new(dir.path())
        .with_key_strategy(KeyStrategy::Name)
        .with_recursive(true);
    let report = dedupe::dedupe(&config).unwrap();

    assert_eq!(report.group_count(), 1);
    assert_eq!(report.groups[0].key.as_os_str(), name);
    assert_eq!(report.groups[0].keep(), dir.path().join("x").join(name));
}
