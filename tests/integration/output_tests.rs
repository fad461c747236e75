use dedupe::duplicates::DedupeConfig;
use dedupe::output::{JsonOutput, PlainOutput};
use dedupe::report::ExecutionMode;
use dedupe::scanner::KeyStrategy;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_json_preview_document() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "X").unwrap();
    fs::write(dir.path().join("b.txt"), "X").unwrap();
    fs::write(dir.path().join("c.txt"), "Y").unwrap();

    let report = dedupe::dedupe(&DedupeConfig::new(dir.path())).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&JsonOutput::new(&report).to_json().unwrap()).unwrap();

    assert_eq!(json["method"], "hash");
    assert_eq!(json["count"], 1);
    assert_eq!(json["to_delete"], 1);
    assert_eq!(json["dry_run"], true);
    assert_eq!(json["interrupted"], false);
    assert_eq!(json["removals"].as_array().unwrap().len(), 0);

    let group = &json["duplicates"][0];
    assert_eq!(
        group["keep"],
        dir.path().join("a.txt").to_string_lossy().as_ref()
    );
    assert_eq!(group["count"], 1);
    assert_eq!(
        group["duplicates"][0],
        dir.path().join("b.txt").to_string_lossy().as_ref()
    );
}

#[test]
fn test_json_apply_lists_removals() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "X").unwrap();
    fs::write(dir.path().join("b"), "X").unwrap();

    let config = DedupeConfig::new(dir.path())
        .with_key_strategy(KeyStrategy::Hash)
        .with_mode(ExecutionMode::Apply);
    let report = dedupe::dedupe(&config).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&JsonOutput::new(&report).to_json().unwrap()).unwrap();

    assert_eq!(json["dry_run"], false);
    let removals = json["removals"].as_array().unwrap();
    assert_eq!(removals.len(), 1);
    assert_eq!(removals[0]["removed"], true);
    assert!(removals[0].get("error").is_none());
}

#[test]
fn test_json_empty_directory() {
    let dir = tempdir().unwrap();

    let report = dedupe::dedupe(&DedupeConfig::new(dir.path())).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&JsonOutput::new(&report).to_json().unwrap()).unwrap();

    assert_eq!(json["count"], 0);
    assert_eq!(json["duplicates"].as_array().unwrap().len(), 0);
}

#[test]
fn test_plain_dry_run_plan() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "X").unwrap();
    fs::write(dir.path().join("b"), "X").unwrap();

    let report = dedupe::dedupe(&DedupeConfig::new(dir.path())).unwrap();
    let text = PlainOutput::new(&report).with_removal_plan(true).render();

    assert!(text.contains("Duplicate group (key: "));
    assert!(text.contains(&format!("  Keep: {}", dir.path().join("a").display())));
    assert!(text.contains(&format!(
        "  Would delete: {}",
        dir.path().join("b").display()
    )));
    assert!(text.ends_with("\nFound 1 duplicate groups\n"));
}
