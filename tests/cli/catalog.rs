use crate::cli::support::TestStore;
use predicates::prelude::*;

#[test]
fn test_term_activation_is_exclusive() {
    let store = TestStore::new();
    let fall = store.create(&["term", "add", "2025 Fall", "--active"]);
    let spring = store.create(&["term", "add", "2026 Spring"]);

    store.json(&["term", "activate", &spring]);

    let terms = store.json(&["term", "list"]);
    let active: Vec<String> = terms
        .as_array()
        .unwrap()
        .iter()
        .filter(|t| t["is_active"] == true)
        .map(|t| t["id"].to_string())
        .collect();
    assert_eq!(active, vec![spring]);
    assert_ne!(fall, active[0]);
}

#[test]
fn test_course_defaults_to_active_term() {
    let store = TestStore::new();
    let term = store.create(&["term", "add", "2025 Fall", "--active"]);
    let program = store.create(&["program", "add", "CS", "Computer Science"]);

    let course = store.json(&["course", "add", "CS101", "Programming I", "--program", &program]);
    assert_eq!(course["term_id"].to_string(), term);
    assert_eq!(course["credits"], 3);
}

#[test]
fn test_course_without_active_term_is_a_usage_error() {
    let store = TestStore::new();
    let program = store.create(&["program", "add", "CS", "Computer Science"]);

    store
        .cmd()
        .args(["course", "add", "CS101", "Programming I", "--program", &program])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no active term"));
}

#[test]
fn test_duplicate_student_is_a_data_error() {
    let store = TestStore::new();
    store.create(&["student", "add", "alice"]);

    store
        .cmd()
        .args(["student", "add", "alice"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_student_list_human() {
    let store = TestStore::new();
    store.create(&["student", "add", "alice", "--name", "Alice Doe"]);
    store.create(&["student", "add", "bob"]);

    store
        .cmd()
        .args(["student", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("Alice Doe"))
        .stdout(predicate::str::contains("bob"));
}

#[test]
fn test_assessment_add_and_list() {
    let store = TestStore::new();
    store.create(&["term", "add", "2025 Fall", "--active"]);
    let program = store.create(&["program", "add", "CS", "Computer Science"]);
    let course = store.create(&["course", "add", "CS101", "Programming I", "--program", &program]);

    let quiz = store.json(&[
        "assessment", "add", "--course", &course, "Quiz 1", "--type", "quiz", "--total", "20",
        "--date", "2025-10-01",
    ]);
    assert_eq!(quiz["kind"], "quiz");
    assert_eq!(quiz["total_score"], 20);
    assert_eq!(quiz["date"], "2025-10-01");

    let listed = store.json(&["assessment", "list", "--course", &course]);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[test]
fn test_po_requires_matching_program_and_term() {
    let store = TestStore::new();
    store.create(&["term", "add", "2025 Fall", "--active"]);
    let next = store.create(&["term", "add", "2026 Spring"]);
    let program = store.create(&["program", "add", "CS", "Computer Science"]);
    let course = store.create(&["course", "add", "CS101", "Programming I", "--program", &program]);
    let lo = store.create(&["lo", "add", "--course", &course, "LO1"]);
    let po_next = store.create(&["po", "add", "--program", &program, "--term", &next, "PO1"]);

    store
        .cmd()
        .args(["map", "lo-po", &lo, &po_next, "0.5"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("constraint violated"));
}

#[test]
fn test_new_outcomes_point_at_recalc() {
    let store = TestStore::new();
    store.create(&["term", "add", "2025 Fall", "--active"]);
    let program = store.create(&["program", "add", "CS", "Computer Science"]);
    let course = store.create(&["course", "add", "CS101", "Programming I", "--program", &program]);

    store
        .cmd()
        .args(["lo", "add", "--course", &course, "LO1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("obetrack recalc course {course}")));

    store
        .cmd()
        .args(["po", "add", "--program", &program, "PO1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("obetrack recalc all"));

    store
        .cmd()
        .args(["--quiet", "po", "add", "--program", &program, "PO2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("recalc").not());
}
