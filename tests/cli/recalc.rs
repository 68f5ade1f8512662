use crate::cli::support::{two_courses, Scenario};
use predicates::prelude::*;

fn disable_auto_recalculate(s: &Scenario) {
    std::fs::write(
        s.store.store_dir().join("config.toml"),
        "version = 1\nauto_recalculate = false\n",
    )
    .unwrap();
}

fn alice_lo_scores(s: &Scenario) -> Vec<f64> {
    s.store
        .json(&["scores", "lo", "--course", &s.course_a, "--student", &s.alice])
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["score"].as_f64().unwrap())
        .collect()
}

#[test]
fn test_auto_recalculate_off_defers_scores() {
    let s = two_courses();
    disable_auto_recalculate(&s);

    s.store
        .cmd()
        .args(["grade", "set", &s.alice, &s.midterm, "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Automatic recalculation is off"));
    assert_eq!(alice_lo_scores(&s), vec![0.0]);

    let output = s.store.json(&["grade", "set", &s.alice, &s.final_exam, "100"]);
    assert!(output["recalculated"].is_null());

    s.store
        .cmd()
        .args(["recalc", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recalculated 2 course(s)"));
    assert_eq!(alice_lo_scores(&s), vec![86.0]);
}

#[test]
fn test_recalc_course() {
    let s = two_courses();
    disable_auto_recalculate(&s);
    s.store.json(&["grade", "set", &s.alice, &s.midterm, "80"]);

    let output = s.store.json(&["recalc", "course", &s.course_a]);
    assert_eq!(output["status"], "ok");
    assert_eq!(output["recalculated"]["courses"], 1);
    assert_eq!(output["recalculated"]["program_scopes"], 1);
    assert_eq!(alice_lo_scores(&s), vec![56.0]);
}

#[test]
fn test_recalc_student_uses_active_term() {
    let s = two_courses();
    disable_auto_recalculate(&s);
    s.store.json(&["grade", "set", &s.alice, &s.exam_b, "70"]);
    s.store.json(&["recalc", "course", &s.course_b]);

    let output = s
        .store
        .json(&["recalc", "student", &s.alice, "--program", &s.program]);
    assert_eq!(output["recalculated"]["courses"], 0);
    assert_eq!(output["recalculated"]["program_scopes"], 1);
    assert_eq!(output["recalculated"]["po_scores"], 1);

    let po = s.store.json(&["scores", "po", "--student", &s.alice]);
    assert!((po[0]["score"].as_f64().unwrap() - 35.0).abs() < 1e-9);
}

#[test]
fn test_recalc_unknown_student_fails() {
    let s = two_courses();

    s.store
        .cmd()
        .args(["recalc", "student", "999", "--program", &s.program])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("student not found: 999"));
}

#[test]
fn test_recalc_all_repairs_deferred_unenroll() {
    let s = two_courses();
    s.store.json(&["unenroll", &s.alice, &s.course_b]);
    s.store.json(&["grade", "set", &s.alice, &s.midterm, "90"]);
    s.store.json(&["grade", "set", &s.alice, &s.final_exam, "90"]);
    disable_auto_recalculate(&s);

    let output = s.store.json(&["unenroll", &s.alice, &s.course_a]);
    assert!(output["recalculated"].is_null());
    let po = s.store.json(&["scores", "po", "--student", &s.alice]);
    assert!((po[0]["score"].as_f64().unwrap() - 90.0).abs() < 1e-9);

    s.store.json(&["recalc", "all"]);
    let po = s.store.json(&["scores", "po", "--student", &s.alice]);
    assert_eq!(po[0]["score"].as_f64().unwrap(), 0.0);
}
