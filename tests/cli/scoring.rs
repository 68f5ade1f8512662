use crate::cli::support::two_courses;
use predicates::prelude::*;

fn lo_score(rows: &serde_json::Value, learning_outcome: &str) -> f64 {
    rows.as_array()
        .unwrap()
        .iter()
        .find(|r| r["learning_outcome"] == learning_outcome)
        .and_then(|r| r["score"].as_f64())
        .unwrap_or_else(|| panic!("no score for {learning_outcome} in {rows}"))
}

#[test]
fn test_grades_roll_up_to_lo_score() {
    let s = two_courses();
    s.store.json(&["grade", "set", &s.alice, &s.midterm, "80"]);
    s.store.json(&["grade", "set", &s.alice, &s.final_exam, "100"]);

    s.store
        .cmd()
        .args(["scores", "lo", "--course", &s.course_a])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("86.00"));
}

#[test]
fn test_missing_grade_counts_as_zero() {
    let s = two_courses();
    s.store.json(&["grade", "set", &s.alice, &s.midterm, "80"]);

    s.store
        .cmd()
        .args(["scores", "lo", "--course", &s.course_a, "--student", &s.alice])
        .assert()
        .success()
        .stdout(predicate::str::contains("56.00"));
}

#[test]
fn test_po_score_spans_courses() {
    let s = two_courses();
    s.store.json(&["grade", "set", &s.alice, &s.midterm, "90"]);
    s.store.json(&["grade", "set", &s.alice, &s.final_exam, "90"]);
    s.store.json(&["grade", "set", &s.alice, &s.exam_b, "70"]);

    s.store
        .cmd()
        .args(["scores", "po", "--student", &s.alice])
        .assert()
        .success()
        .stdout(predicate::str::contains("PO1"))
        .stdout(predicate::str::contains("80.00"));
}

#[test]
fn test_unenroll_removes_course_contribution() {
    let s = two_courses();
    s.store.json(&["grade", "set", &s.alice, &s.midterm, "90"]);
    s.store.json(&["grade", "set", &s.alice, &s.final_exam, "90"]);
    s.store.json(&["grade", "set", &s.alice, &s.exam_b, "70"]);

    s.store
        .cmd()
        .args(["unenroll", &s.alice, &s.course_b])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unenrolled student"));

    s.store
        .cmd()
        .args(["scores", "po", "--student", &s.alice, "--program", &s.program])
        .assert()
        .success()
        .stdout(predicate::str::contains("90.00"));

    let remaining: i64 = s
        .store
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM student_lo_scores
             WHERE student_id = ?1 AND learning_outcome_id = ?2",
            [
                s.alice.parse::<i64>().unwrap(),
                s.lo_b1.parse::<i64>().unwrap(),
            ],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(remaining, 0);
}

#[test]
fn test_mutation_reports_recalculation() {
    let s = two_courses();
    let output = s.store.json(&["grade", "set", &s.alice, &s.midterm, "80"]);

    assert_eq!(output["status"], "ok");
    assert_eq!(output["grade"]["score"], 80.0);
    assert_eq!(output["recalculated"]["courses"], 1);
    assert_eq!(output["recalculated"]["lo_scores"], 1);
    assert_eq!(output["recalculated"]["po_scores"], 1);
}

#[test]
fn test_mapping_weight_change_recalculates() {
    let s = two_courses();
    s.store.json(&["grade", "set", &s.alice, &s.midterm, "80"]);
    s.store.json(&["grade", "set", &s.alice, &s.final_exam, "100"]);

    let initial = s.store.json(&["scores", "lo", "--course", &s.course_a]);
    let lo_a1 = initial[0]["learning_outcome_id"].to_string();

    // equal weights: (80 + 100) / 2
    s.store
        .json(&["map", "assessment-lo", &s.midterm, &lo_a1, "0.3"]);
    let rows = s.store.json(&["scores", "lo", "--course", &s.course_a]);
    assert!((lo_score(&rows, "LO1") - 90.0).abs() < 1e-9);

    // only the final remains mapped
    s.store
        .json(&["map", "assessment-lo", &s.midterm, &lo_a1, "--remove"]);
    let rows = s.store.json(&["scores", "lo", "--course", &s.course_a]);
    assert!((lo_score(&rows, "LO1") - 100.0).abs() < 1e-9);
}

#[test]
fn test_deleting_an_assessment_recalculates() {
    let s = two_courses();
    s.store.json(&["grade", "set", &s.alice, &s.midterm, "80"]);
    s.store.json(&["grade", "set", &s.alice, &s.final_exam, "100"]);

    s.store.json(&["assessment", "delete", &s.final_exam]);

    let rows = s.store.json(&["scores", "lo", "--course", &s.course_a]);
    assert!((lo_score(&rows, "LO1") - 80.0).abs() < 1e-9);
}

#[test]
fn test_bulk_enrollment_scores_new_students() {
    let s = two_courses();
    let bob = s.store.create(&["student", "add", "bob"]);
    let carol = s.store.create(&["student", "add", "carol"]);

    let output = s
        .store
        .json(&["enroll-bulk", &s.course_a, &bob, &carol, &s.alice]);
    assert_eq!(output["enrollment"]["enrolled"].as_array().unwrap().len(), 2);
    assert_eq!(
        output["enrollment"]["already_enrolled"].as_array().unwrap().len(),
        1
    );
    assert_eq!(output["recalculated"]["courses"], 1);

    let rows = s.store.json(&["scores", "lo", "--course", &s.course_a]);
    assert_eq!(rows.as_array().unwrap().len(), 3);
}

#[test]
fn test_unchanged_assessment_weight_skips_recalculation() {
    let s = two_courses();

    let unchanged = s.store.json(&["assessment", "set-weight", &s.midterm, "0"]);
    assert!(unchanged["recalculated"].is_null());

    let changed = s.store.json(&["assessment", "set-weight", &s.midterm, "0.4"]);
    assert_eq!(changed["recalculated"]["courses"], 1);
}
