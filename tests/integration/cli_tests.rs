//! CLI smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn reaper() -> Command {
    Command::cargo_bin("reaper").unwrap()
}

#[test]
fn test_help_describes_the_tool() {
    reaper()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("excise"))
        .stdout(predicate::str::contains("--platform"))
        .stdout(predicate::str::contains("--skip-delete-usages"));
}

#[test]
fn test_requires_input_and_platform() {
    reaper().assert().failure().stderr(predicate::str::contains("--input"));
}

#[test]
fn test_deletes_types_from_export() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("Sources")).unwrap();
    std::fs::write(
        dir.path().join("Sources/Doomed.swift"),
        "class Doomed {\n}\n\nclass Keeper {\n}\n",
    )
    .unwrap();

    let export = dir.path().join("export.json");
    std::fs::write(&export, r#"[{"class_name": "App.Doomed"}]"#).unwrap();

    reaper()
        .arg(dir.path())
        .arg("--input")
        .arg(&export)
        .arg("--platform")
        .arg("ios")
        .arg("--yes")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 dead types"));

    let contents = std::fs::read_to_string(dir.path().join("Sources/Doomed.swift")).unwrap();
    assert!(!contents.contains("Doomed"));
    assert!(contents.contains("Keeper"));
}

#[test]
fn test_seen_types_are_not_deleted() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("Sources")).unwrap();
    let source = dir.path().join("Sources/Alive.swift");
    std::fs::write(&source, "class Alive {\n}\n").unwrap();

    let export = dir.path().join("export.json");
    std::fs::write(
        &export,
        r#"{"dead_code": [{"class_name": "App.Alive", "seen": true}]}"#,
    )
    .unwrap();

    reaper()
        .arg(dir.path())
        .arg("--input")
        .arg(&export)
        .arg("--platform")
        .arg("ios")
        .arg("--yes")
        .arg("--quiet")
        .assert()
        .success();

    let contents = std::fs::read_to_string(&source).unwrap();
    assert!(contents.contains("Alive"));
}

#[test]
fn test_missing_export_fails() {
    reaper()
        .arg("--input")
        .arg("does-not-exist.json")
        .arg("--platform")
        .arg("android")
        .arg("--yes")
        .assert()
        .failure();
}
