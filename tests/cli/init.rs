use crate::cli::support::{obetrack, TestStore};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_init_creates_store() {
    let dir = tempdir().unwrap();

    obetrack()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized obetrack store"));

    assert!(dir.path().join(".obetrack/config.toml").exists());
    assert!(dir.path().join(".obetrack/obetrack.db").exists());
}

#[test]
fn test_init_idempotent() {
    let store = TestStore::new();
    store.create(&["program", "add", "CS", "Computer Science"]);

    store.cmd().arg("init").assert().success();

    let programs = store.json(&["program", "list"]);
    assert_eq!(programs.as_array().unwrap().len(), 1);
}

#[test]
fn test_init_json_output() {
    let dir = tempdir().unwrap();

    obetrack()
        .current_dir(dir.path())
        .args(["--format", "json", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"ok\""));
}

#[test]
fn test_explicit_store_path() {
    let dir = tempdir().unwrap();

    obetrack()
        .current_dir(dir.path())
        .args(["--store", "data/outcomes", "init"])
        .assert()
        .success();
    assert!(dir.path().join("data/outcomes/config.toml").exists());

    obetrack()
        .current_dir(dir.path())
        .args(["--store", "data/outcomes", "student", "add", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created student"));
}

#[test]
fn test_store_discovered_from_subdirectory() {
    let store = TestStore::new();
    let nested = store.store_dir().parent().unwrap().join("src/deep");
    std::fs::create_dir_all(&nested).unwrap();

    obetrack()
        .current_dir(&nested)
        .args(["program", "add", "EE", "Electrical Engineering"])
        .assert()
        .success();
}

#[test]
fn test_no_command_prints_version() {
    obetrack()
        .assert()
        .success()
        .stdout(predicate::str::contains("obetrack"));
}
