//! CLI argument parsing for obetrack
//!
//! Global flags: --root, --store, --format, --quiet, --verbose, --log-level,
//! --log-json

pub mod catalog;
pub mod grading;
pub mod parse;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use obetrack_core::model::{CourseId, StudentId};
pub use obetrack_core::format::OutputFormat;

pub use catalog::{
    CourseCommands, LoCommands, PoCommands, ProgramCommands, StudentCommands, TermCommands,
};
pub use grading::{AssessmentCommands, GradeCommands, MapCommands, RecalcCommands, ScoresCommands};
use parse::parse_format;

/// Obetrack - outcome-based education score tracking
#[derive(Parser, Debug)]
#[command(name = "obetrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory for resolving the store
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit store root path
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Output format (human or json)
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. "debug", "obetrack_core=trace")
    #[arg(long, global = true, env = "OBETRACK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new obetrack store
    Init,

    /// Manage academic terms
    #[command(subcommand)]
    Term(TermCommands),

    /// Manage degree programs
    #[command(subcommand)]
    Program(ProgramCommands),

    /// Manage courses
    #[command(subcommand)]
    Course(CourseCommands),

    /// Manage learning outcomes
    #[command(subcommand)]
    Lo(LoCommands),

    /// Manage program outcomes
    #[command(subcommand)]
    Po(PoCommands),

    /// Manage students
    #[command(subcommand)]
    Student(StudentCommands),

    /// Manage assessments
    #[command(subcommand)]
    Assessment(AssessmentCommands),

    /// Edit the outcome mapping graph
    #[command(subcommand)]
    Map(MapCommands),

    /// Enroll a student in a course
    Enroll {
        /// Student id
        student: StudentId,

        /// Course id
        course: CourseId,
    },

    /// Enroll several students in a course at once
    EnrollBulk {
        /// Course id
        course: CourseId,

        /// Student ids
        #[arg(required = true)]
        students: Vec<StudentId>,
    },

    /// Remove a student from a course
    Unenroll {
        /// Student id
        student: StudentId,

        /// Course id
        course: CourseId,
    },

    /// Record or remove grades
    #[command(subcommand)]
    Grade(GradeCommands),

    /// Recompute derived outcome scores
    #[command(subcommand)]
    Recalc(RecalcCommands),

    /// Show derived outcome scores
    #[command(subcommand)]
    Scores(ScoresCommands),
}
