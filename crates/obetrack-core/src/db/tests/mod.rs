mod open;

use crate::db::{Database, NewAssessment};
use crate::model::{
    AssessmentId, AssessmentType, CourseId, LearningOutcomeId, ProgramId, ProgramOutcomeId,
    StudentId, TermId,
};

/// Two courses of one program/term, each with one LO mapped to a shared PO,
/// and two students enrolled in both.
///
/// Course A has a midterm (LO_A1 weight 0.7) and a final (LO_A1 weight 0.3).
/// Course B has a single exam mapped to LO_B1. No grades are recorded.
pub(crate) struct World {
    pub db: Database,
    pub term: TermId,
    pub program: ProgramId,
    pub course_a: CourseId,
    pub course_b: CourseId,
    pub lo_a1: LearningOutcomeId,
    pub lo_b1: LearningOutcomeId,
    pub po1: ProgramOutcomeId,
    pub midterm: AssessmentId,
    pub final_exam: AssessmentId,
    pub exam_b: AssessmentId,
    pub alice: StudentId,
    pub bob: StudentId,
}

pub(crate) fn assessment(
    db: &Database,
    course_id: CourseId,
    name: &str,
    kind: AssessmentType,
) -> AssessmentId {
    db.create_assessment(&NewAssessment {
        course_id,
        name,
        kind,
        total_score: 100,
        weight: 0.5,
        date: None,
    })
    .unwrap()
    .id
}

impl World {
    pub(crate) fn new() -> Self {
        let db = Database::open_in_memory().unwrap();
        let term = db.create_term("2025 Fall", true).unwrap().id;
        let program = db.create_program("CS", "Computer Science").unwrap().id;
        let course_a = db
            .create_course("CS101", "Programming I", 4, program, term)
            .unwrap()
            .id;
        let course_b = db
            .create_course("CS102", "Discrete Math", 3, program, term)
            .unwrap()
            .id;

        let lo_a1 = db
            .create_learning_outcome(course_a, "LO1", "Write small programs")
            .unwrap()
            .id;
        let lo_b1 = db
            .create_learning_outcome(course_b, "LO1", "Reason about sets")
            .unwrap()
            .id;
        let po1 = db
            .create_program_outcome(program, term, "PO1", "Problem solving")
            .unwrap()
            .id;

        let midterm = assessment(&db, course_a, "Midterm", AssessmentType::Midterm);
        let final_exam = assessment(&db, course_a, "Final", AssessmentType::Final);
        let exam_b = assessment(&db, course_b, "Exam", AssessmentType::Final);

        db.upsert_assessment_lo_mapping(midterm, lo_a1, 0.7).unwrap();
        db.upsert_assessment_lo_mapping(final_exam, lo_a1, 0.3)
            .unwrap();
        db.upsert_assessment_lo_mapping(exam_b, lo_b1, 1.0).unwrap();
        db.upsert_lo_po_mapping(lo_a1, po1, 0.5).unwrap();
        db.upsert_lo_po_mapping(lo_b1, po1, 0.5).unwrap();

        let alice = db.create_student("alice", Some("Alice Doe")).unwrap().id;
        let bob = db.create_student("bob", None).unwrap().id;
        for course in [course_a, course_b] {
            db.enroll_many(course, &[alice, bob]).unwrap();
        }

        World {
            db,
            term,
            program,
            course_a,
            course_b,
            lo_a1,
            lo_b1,
            po1,
            midterm,
            final_exam,
            exam_b,
            alice,
            bob,
        }
    }

    /// Stored LO score, if a row exists
    pub(crate) fn lo_score(&self, student: StudentId, lo: LearningOutcomeId) -> Option<f64> {
        self.db
            .conn
            .query_row(
                "SELECT score FROM student_lo_scores WHERE student_id = ?1 AND learning_outcome_id = ?2",
                rusqlite::params![student, lo],
                |r| r.get(0),
            )
            .ok()
    }

    /// Stored PO score for the world's term, if a row exists
    pub(crate) fn po_score(&self, student: StudentId, po: ProgramOutcomeId) -> Option<f64> {
        self.db
            .conn
            .query_row(
                "SELECT score FROM student_po_scores WHERE student_id = ?1 AND program_outcome_id = ?2 AND term_id = ?3",
                rusqlite::params![student, po, self.term],
                |r| r.get(0),
            )
            .ok()
    }
}
