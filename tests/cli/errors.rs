use crate::cli::support::{obetrack, two_courses, TestStore};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_missing_store_exit_code() {
    let dir = tempdir().unwrap();

    obetrack()
        .current_dir(dir.path())
        .args(["term", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("store not found"));
}

#[test]
fn test_unknown_format_is_usage_error() {
    obetrack()
        .args(["--format", "yaml", "init"])
        .assert()
        .code(2);
}

#[test]
fn test_out_of_range_weight_is_usage_error() {
    let s = two_courses();
    s.store
        .cmd()
        .args(["assessment", "set-weight", &s.midterm, "1.5"])
        .assert()
        .code(2);
}

#[test]
fn test_grade_above_total_is_rejected() {
    let s = two_courses();
    s.store
        .cmd()
        .args(["grade", "set", &s.alice, &s.midterm, "120"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("exceeds total"));
}

#[test]
fn test_grade_for_unenrolled_student_is_rejected() {
    let s = two_courses();
    let bob = s.store.create(&["student", "add", "bob"]);

    s.store
        .cmd()
        .args(["grade", "set", &bob, &s.midterm, "50"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not enrolled"));
}

#[test]
fn test_not_found_json_envelope() {
    let store = TestStore::new();

    let output = store
        .cmd()
        .args(["--format", "json", "recalc", "course", "404"])
        .assert()
        .code(3)
        .get_output()
        .stderr
        .clone();

    let error: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(error["error"]["type"], "not_found");
    assert_eq!(error["error"]["entity"], "course");
    assert_eq!(error["error"]["id"], "404");
}

#[test]
fn test_parse_error_json_envelope() {
    let store = TestStore::new();

    let output = store
        .cmd()
        .args(["--format", "json", "grade", "set", "abc", "1", "2"])
        .assert()
        .code(2)
        .get_output()
        .stderr
        .clone();

    let error: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(error["error"]["type"], "usage_error");
}

#[test]
fn test_quiet_suppresses_error_text() {
    let dir = tempdir().unwrap();

    obetrack()
        .current_dir(dir.path())
        .args(["--quiet", "term", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::is_empty());
}
