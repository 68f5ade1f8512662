//! Assessment, mapping, grade, and score subcommands

use chrono::NaiveDate;
use clap::Subcommand;

use obetrack_core::model::{
    AssessmentId, AssessmentType, CourseId, LearningOutcomeId, ProgramId, ProgramOutcomeId,
    StudentId, TermId,
};

use super::parse::{parse_assessment_type, parse_date, parse_weight};

/// Assessment subcommands
#[derive(Subcommand, Debug)]
pub enum AssessmentCommands {
    /// Create an assessment in a course
    Add {
        /// Course id
        #[arg(long)]
        course: CourseId,

        /// Assessment name
        name: String,

        /// Kind: midterm, final, homework, project, quiz, attendance, other
        #[arg(long = "type", short = 'T', default_value = "homework", value_parser = parse_assessment_type)]
        kind: AssessmentType,

        /// Maximum achievable score
        #[arg(long, default_value_t = 100)]
        total: u32,

        /// Share of the course grade, in [0, 1]
        #[arg(long, default_value = "0", value_parser = parse_weight)]
        weight: f64,

        /// Date held (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// List the assessments of a course
    List {
        /// Course id
        #[arg(long)]
        course: CourseId,
    },

    /// Change an assessment's course-grade weight
    SetWeight {
        /// Assessment id
        assessment: AssessmentId,

        /// New weight, in [0, 1]
        #[arg(value_parser = parse_weight)]
        weight: f64,
    },

    /// Delete an assessment with its grades and mappings
    Delete {
        /// Assessment id
        assessment: AssessmentId,
    },
}

/// Mapping subcommands
#[derive(Subcommand, Debug)]
pub enum MapCommands {
    /// Set or remove how much an assessment contributes to a learning outcome
    AssessmentLo {
        /// Assessment id
        assessment: AssessmentId,

        /// Learning outcome id
        learning_outcome: LearningOutcomeId,

        /// Weight in [0, 1]
        #[arg(value_parser = parse_weight, required_unless_present = "remove", conflicts_with = "remove")]
        weight: Option<f64>,

        /// Remove the mapping instead
        #[arg(long)]
        remove: bool,
    },

    /// Set or remove how much a learning outcome contributes to a program outcome
    LoPo {
        /// Learning outcome id
        learning_outcome: LearningOutcomeId,

        /// Program outcome id
        program_outcome: ProgramOutcomeId,

        /// Weight in [0, 1]
        #[arg(value_parser = parse_weight, required_unless_present = "remove", conflicts_with = "remove")]
        weight: Option<f64>,

        /// Remove the mapping instead
        #[arg(long)]
        remove: bool,
    },
}

/// Grade subcommands
#[derive(Subcommand, Debug)]
pub enum GradeCommands {
    /// Record or overwrite a grade
    Set {
        /// Student id
        student: StudentId,

        /// Assessment id
        assessment: AssessmentId,

        /// Raw score, between 0 and the assessment total
        score: f64,
    },

    /// Remove a grade
    Delete {
        /// Student id
        student: StudentId,

        /// Assessment id
        assessment: AssessmentId,
    },
}

/// Recalculation subcommands
#[derive(Subcommand, Debug)]
pub enum RecalcCommands {
    /// Recompute a course's LO scores and its students' PO scores
    Course {
        /// Course id
        course: CourseId,
    },

    /// Recompute one student's PO scores for a program and term
    Student {
        /// Student id
        student: StudentId,

        /// Program id
        #[arg(long)]
        program: ProgramId,

        /// Term id (defaults to the active term)
        #[arg(long)]
        term: Option<TermId>,
    },

    /// Recompute every course
    All {},
}

/// Score listing subcommands
#[derive(Subcommand, Debug)]
pub enum ScoresCommands {
    /// Learning outcome scores of a course
    Lo {
        /// Course id
        #[arg(long)]
        course: CourseId,

        /// Only this student
        #[arg(long)]
        student: Option<StudentId>,
    },

    /// Program outcome scores of a student
    Po {
        /// Student id
        #[arg(long)]
        student: StudentId,

        /// Only this program
        #[arg(long)]
        program: Option<ProgramId>,

        /// Only this term
        #[arg(long)]
        term: Option<TermId>,
    },
}
