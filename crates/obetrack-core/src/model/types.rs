//! Entity type definitions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{
    AssessmentId, CourseId, LearningOutcomeId, ProgramId, ProgramOutcomeId, StudentId, TermId,
};
use crate::error::ObeError;

/// Academic term. At most one term is active at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub code: String,
    pub name: String,
}

/// A course belongs to exactly one program and one term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub program_id: ProgramId,
    pub term_id: TermId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningOutcome {
    pub id: LearningOutcomeId,
    pub course_id: CourseId,
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramOutcome {
    pub id: ProgramOutcomeId,
    pub program_id: ProgramId,
    pub term_id: TermId,
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub username: String,
    pub full_name: Option<String>,
}

/// Kind of graded work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentType {
    Midterm,
    Final,
    #[default]
    Homework,
    Project,
    Quiz,
    Attendance,
    Other,
}

impl AssessmentType {
    pub const ALL: [AssessmentType; 7] = [
        AssessmentType::Midterm,
        AssessmentType::Final,
        AssessmentType::Homework,
        AssessmentType::Project,
        AssessmentType::Quiz,
        AssessmentType::Attendance,
        AssessmentType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssessmentType::Midterm => "midterm",
            AssessmentType::Final => "final",
            AssessmentType::Homework => "homework",
            AssessmentType::Project => "project",
            AssessmentType::Quiz => "quiz",
            AssessmentType::Attendance => "attendance",
            AssessmentType::Other => "other",
        }
    }
}

impl fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssessmentType {
    type Err = ObeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        AssessmentType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| ObeError::invalid_value("assessment type", s))
    }
}

/// Graded work in a course.
///
/// `weight` is the assessment's share of a course grade. Outcome aggregation
/// does not read it; only assessment→LO mapping weights feed LO scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub course_id: CourseId,
    pub name: String,
    pub kind: AssessmentType,
    pub total_score: u32,
    pub weight: f64,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessmentLoMapping {
    pub assessment_id: AssessmentId,
    pub learning_outcome_id: LearningOutcomeId,
    pub weight: f64,
}

/// LO→PO edge. `course_id` always equals the learning outcome's course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoPoMapping {
    pub course_id: CourseId,
    pub learning_outcome_id: LearningOutcomeId,
    pub program_outcome_id: ProgramOutcomeId,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub student_id: StudentId,
    pub assessment_id: AssessmentId,
    pub score: f64,
}

/// Derived: a student's score on one learning outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudentLoScore {
    pub student_id: StudentId,
    pub learning_outcome_id: LearningOutcomeId,
    pub score: f64,
}

/// Derived: a student's score on one program outcome in one term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudentPoScore {
    pub student_id: StudentId,
    pub program_outcome_id: ProgramOutcomeId,
    pub term_id: TermId,
    pub score: f64,
}
