//! Academic structure subcommands

use clap::Subcommand;

use obetrack_core::model::{CourseId, ProgramId, TermId};

/// Term subcommands
#[derive(Subcommand, Debug)]
pub enum TermCommands {
    /// Create a term
    Add {
        /// Term name (e.g. "2025 Fall")
        name: String,

        /// Make this the active term (deactivates every other term)
        #[arg(long)]
        active: bool,
    },

    /// List terms
    List {},

    /// Make a term the active term
    Activate {
        /// Term id
        term: TermId,
    },
}

/// Program subcommands
#[derive(Subcommand, Debug)]
pub enum ProgramCommands {
    /// Create a program
    Add {
        /// Unique program code
        code: String,

        /// Program name
        name: String,
    },

    /// List programs
    List {},
}

/// Course subcommands
#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    /// Create a course in a program and term
    Add {
        /// Course code, unique within the program and term
        code: String,

        /// Course name
        name: String,

        /// Program id
        #[arg(long)]
        program: ProgramId,

        /// Term id (defaults to the active term)
        #[arg(long)]
        term: Option<TermId>,

        /// Credit hours
        #[arg(long, default_value_t = 3)]
        credits: u32,
    },

    /// List courses
    List {
        /// Only courses of this program
        #[arg(long)]
        program: Option<ProgramId>,

        /// Only courses of this term
        #[arg(long)]
        term: Option<TermId>,
    },
}

/// Learning outcome subcommands
#[derive(Subcommand, Debug)]
pub enum LoCommands {
    /// Create a learning outcome for a course
    Add {
        /// Course id
        #[arg(long)]
        course: CourseId,

        /// Outcome code, unique within the course (e.g. LO1)
        code: String,

        /// What the outcome measures
        #[arg(long, default_value = "")]
        description: String,
    },

    /// List the learning outcomes of a course
    List {
        /// Course id
        #[arg(long)]
        course: CourseId,
    },
}

/// Program outcome subcommands
#[derive(Subcommand, Debug)]
pub enum PoCommands {
    /// Create a program outcome for a program and term
    Add {
        /// Program id
        #[arg(long)]
        program: ProgramId,

        /// Term id (defaults to the active term)
        #[arg(long)]
        term: Option<TermId>,

        /// Outcome code, unique within the program and term (e.g. PO1)
        code: String,

        /// What the outcome measures
        #[arg(long, default_value = "")]
        description: String,
    },

    /// List the program outcomes of a program and term
    List {
        /// Program id
        #[arg(long)]
        program: ProgramId,

        /// Term id (defaults to the active term)
        #[arg(long)]
        term: Option<TermId>,
    },
}

/// Student subcommands
#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    /// Register a student
    Add {
        /// Unique username
        username: String,

        /// Full name
        #[arg(long)]
        name: Option<String>,
    },

    /// List students
    List {},
}
