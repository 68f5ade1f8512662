//! Outcome score aggregation
//!
//! Grades flow through two weighted averages:
//!
//! 1. assessment grades → per-student learning outcome (LO) scores, one course
//!    at a time ([`course`])
//! 2. LO scores across every course a student takes in a program/term →
//!    per-student program outcome (PO) scores ([`program`])
//!
//! Derived rows are never patched. Each recalculation recomputes its whole
//! scope and replaces the stored set in one transaction, so stored scores are
//! always a pure function of the source facts.

pub mod course;
mod engine;
pub mod program;
mod trigger;

use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::model::{
    AssessmentId, Course, CourseId, LearningOutcomeId, LoPoMapping, ProgramId, ProgramOutcomeId,
    StudentId, StudentLoScore, StudentPoScore, TermId,
};

pub use engine::{RecalcSummary, ScoreEngine};
pub use trigger::{RecalcAction, RecalcEvent};

/// Weighted mean of `(value, weight)` pairs; 0 when the weights sum to 0.
pub fn weighted_average<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (weighted_sum, weight_sum) = pairs
        .into_iter()
        .fold((0.0, 0.0), |(sum, weights), (value, weight)| {
            (sum + value * weight, weights + weight)
        });

    if weight_sum > 0.0 {
        weighted_sum / weight_sum
    } else {
        0.0
    }
}

/// Everything the engine reads from and writes to.
///
/// Reads are the source facts owned by the collaborator layer; the only
/// writes are whole-scope replacements of derived scores via
/// [`OutcomeStore::commit_scores`].
pub trait OutcomeStore {
    /// Load a course, failing with NotFound if absent
    fn course(&self, id: CourseId) -> Result<Course>;

    /// Every course, for full recalculation
    fn all_courses(&self) -> Result<Vec<Course>>;

    /// Fail with NotFound unless student, program, and term all exist
    fn ensure_scope(&self, student: StudentId, program: ProgramId, term: TermId) -> Result<()>;

    fn enrolled_students(&self, course: CourseId) -> Result<Vec<StudentId>>;

    fn learning_outcomes(&self, course: CourseId) -> Result<Vec<LearningOutcomeId>>;

    /// Assessment→LO weights for the course's assessments
    fn assessment_lo_weights(
        &self,
        course: CourseId,
    ) -> Result<BTreeMap<(AssessmentId, LearningOutcomeId), f64>>;

    /// Grades on the course's assessments
    fn grades(&self, course: CourseId) -> Result<BTreeMap<(StudentId, AssessmentId), f64>>;

    /// Courses of `(program, term)` the student is enrolled in, ordered by id
    fn enrolled_courses(
        &self,
        student: StudentId,
        program: ProgramId,
        term: TermId,
    ) -> Result<Vec<CourseId>>;

    fn program_outcomes(&self, program: ProgramId, term: TermId) -> Result<Vec<ProgramOutcomeId>>;

    fn lo_po_weights(&self, course: CourseId) -> Result<Vec<LoPoMapping>>;

    /// The student's stored LO scores for LOs of the given courses
    fn student_lo_scores(
        &self,
        student: StudentId,
        courses: &[CourseId],
    ) -> Result<HashMap<LearningOutcomeId, f64>>;

    /// Distinct `(student, program, term)` scopes that have stored PO scores
    fn scored_program_scopes(&self) -> Result<Vec<(StudentId, ProgramId, TermId)>>;

    /// Apply every operation of the batch atomically
    fn commit_scores(&self, batch: ScoreBatch) -> Result<()>;
}

/// One scope replacement in the derived-score tables
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOp {
    /// Drop every LO score of the course's LOs, then insert `scores`
    ReplaceCourseLoScores {
        course_id: CourseId,
        scores: Vec<StudentLoScore>,
    },
    /// Drop the student's PO scores for the program/term, then insert `scores`
    ReplaceStudentPoScores {
        student_id: StudentId,
        program_id: ProgramId,
        term_id: TermId,
        scores: Vec<StudentPoScore>,
    },
    /// Drop the student's LO scores for the course's LOs
    DropStudentCourseLoScores {
        student_id: StudentId,
        course_id: CourseId,
    },
}

/// Ordered set of scope replacements committed in a single transaction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBatch {
    ops: Vec<ScoreOp>,
}

impl ScoreBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: ScoreOp) -> &mut Self {
        self.ops.push(op);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[ScoreOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<ScoreOp> {
        self.ops
    }
}

impl From<ScoreOp> for ScoreBatch {
    fn from(op: ScoreOp) -> Self {
        Self { ops: vec![op] }
    }
}
