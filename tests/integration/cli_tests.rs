use clap::Parser;
use dedupe::cli::Cli;
use dedupe::error::ExitCode;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

use super::fixtures::snapshot;

/// Empty defaults file so the user's own config never leaks into tests.
fn empty_config() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "").unwrap();
    dir
}

fn run(config_dir: &Path, args: &[&str]) -> anyhow::Result<ExitCode> {
    let config = config_dir.join("config.toml");
    let mut argv = vec![
        "dedupe".to_string(),
        "-q".to_string(),
        "--config".to_string(),
        config.to_string_lossy().into_owned(),
    ];
    argv.extend(args.iter().map(|s| s.to_string()));
    dedupe::run_app(Cli::try_parse_from(argv).unwrap())
}

#[test]
fn test_list_does_not_modify() {
    let cfg = empty_config();
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "X").unwrap();
    fs::write(dir.path().join("b"), "X").unwrap();
    let root = dir.path().to_string_lossy().into_owned();
    let before = snapshot(dir.path());

    let code = run(cfg.path(), &["dedupe", &root, "-o", "json"]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(snapshot(dir.path()), before);
}

#[test]
fn test_delete_dry_run_does_not_modify() {
    let cfg = empty_config();
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "X").unwrap();
    fs::write(dir.path().join("b"), "X").unwrap();
    let root = dir.path().to_string_lossy().into_owned();
    let before = snapshot(dir.path());

    let code = run(cfg.path(), &["dedupe", &root, "-a", "delete", "-d"]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(snapshot(dir.path()), before);
}

#[test]
fn test_delete_removes_duplicates() {
    let cfg = empty_config();
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "X").unwrap();
    fs::write(dir.path().join("b"), "X").unwrap();
    let root = dir.path().to_string_lossy().into_owned();

    let code = run(cfg.path(), &["dedupe", &root, "--action", "delete"]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(dir.path().join("a").exists());
    assert!(!dir.path().join("b").exists());
}

#[test]
fn test_config_file_sets_defaults() {
    let cfg = tempdir().unwrap();
    fs::write(
        cfg.path().join("config.toml"),
        "by = \"name\"\nrecursive = true\n",
    )
    .unwrap();
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("x")).unwrap();
    fs::create_dir(dir.path().join("y")).unwrap();
    fs::write(dir.path().join("x").join("same"), "1").unwrap();
    fs::write(dir.path().join("y").join("same"), "2").unwrap();
    let root = dir.path().to_string_lossy().into_owned();

    let code = run(cfg.path(), &["dedupe", &root, "-a", "delete"]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(dir.path().join("x").join("same").exists());
    assert!(!dir.path().join("y").join("same").exists());
}

#[test]
fn test_missing_root_returns_error() {
    let cfg = empty_config();
    let dir = tempdir().unwrap();
    let root = dir.path().join("missing").to_string_lossy().into_owned();

    let err = run(cfg.path(), &["dedupe", &root]).unwrap_err();

    assert!(err
        .downcast_ref::<dedupe::duplicates::FinderError>()
        .is_some());
}

#[test]
fn test_missing_config_file_returns_error() {
    let cfg = tempdir().unwrap();
    let dir = tempdir().unwrap();
    let root = dir.path().to_string_lossy().into_owned();

    assert!(run(cfg.path(), &["dedupe", &root]).is_err());
}
