use std::path::PathBuf;

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use tempfile::{tempdir, TempDir};

/// Get a Command for obetrack
pub fn obetrack() -> Command {
    cargo_bin_cmd!("obetrack")
}

/// An initialized store in a temporary project directory
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempdir().unwrap();
        obetrack()
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success();
        TestStore { dir }
    }

    /// A command running inside the project directory
    pub fn cmd(&self) -> Command {
        let mut cmd = obetrack();
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run with `--format json`, require success, and parse stdout
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .cmd()
            .arg("--format")
            .arg("json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).unwrap()
    }

    /// Run a create command and return the new row's id as a string
    pub fn create(&self, args: &[&str]) -> String {
        let value = self.json(args);
        value["id"]
            .as_i64()
            .unwrap_or_else(|| panic!("no id in {value}"))
            .to_string()
    }

    pub fn store_dir(&self) -> PathBuf {
        self.dir.path().join(".obetrack")
    }

    pub fn connection(&self) -> rusqlite::Connection {
        rusqlite::Connection::open(self.store_dir().join("obetrack.db")).unwrap()
    }
}

/// Ids of the two-course scenario built by [`two_courses`]
pub struct Scenario {
    pub store: TestStore,
    pub program: String,
    pub course_a: String,
    pub course_b: String,
    pub lo_b1: String,
    pub midterm: String,
    pub final_exam: String,
    pub exam_b: String,
    pub alice: String,
}

/// Program CS in the active term with two courses.
///
/// CS101: Midterm (LO1 weight 0.7) and Final (LO1 weight 0.3).
/// CS102: Exam (LO1 weight 1.0). Each course's LO1 maps to PO1 with weight
/// 0.5. Alice is enrolled in both and has no grades yet.
pub fn two_courses() -> Scenario {
    let store = TestStore::new();
    store.create(&["term", "add", "2025 Fall", "--active"]);
    let program = store.create(&["program", "add", "CS", "Computer Science"]);
    let course_a = store.create(&["course", "add", "CS101", "Programming I", "--program", &program]);
    let course_b = store.create(&["course", "add", "CS102", "Discrete Math", "--program", &program]);
    let lo_a1 = store.create(&["lo", "add", "--course", &course_a, "LO1"]);
    let lo_b1 = store.create(&["lo", "add", "--course", &course_b, "LO1"]);
    let po1 = store.create(&["po", "add", "--program", &program, "PO1"]);

    let midterm = store.create(&[
        "assessment", "add", "--course", &course_a, "Midterm", "--type", "midterm",
    ]);
    let final_exam = store.create(&[
        "assessment", "add", "--course", &course_a, "Final", "--type", "final",
    ]);
    let exam_b = store.create(&[
        "assessment", "add", "--course", &course_b, "Exam", "--type", "final",
    ]);

    store.json(&["map", "assessment-lo", &midterm, &lo_a1, "0.7"]);
    store.json(&["map", "assessment-lo", &final_exam, &lo_a1, "0.3"]);
    store.json(&["map", "assessment-lo", &exam_b, &lo_b1, "1.0"]);
    store.json(&["map", "lo-po", &lo_a1, &po1, "0.5"]);
    store.json(&["map", "lo-po", &lo_b1, &po1, "0.5"]);

    let alice = store.create(&["student", "add", "alice", "--name", "Alice Doe"]);
    store.json(&["enroll", &alice, &course_a]);
    store.json(&["enroll", &alice, &course_b]);

    Scenario {
        store,
        program,
        course_a,
        course_b,
        lo_b1,
        midterm,
        final_exam,
        exam_b,
        alice,
    }
}
