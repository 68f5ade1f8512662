//! Routing from parsed subcommands to command implementations

use crate::cli::{
    AssessmentCommands, CourseCommands, GradeCommands, LoCommands, MapCommands, PoCommands,
    ProgramCommands, RecalcCommands, ScoresCommands, StudentCommands, TermCommands,
};
use crate::cli::{Cli, Commands};
use crate::commands::{assessment, catalog, enroll, grade, init, mapping, recalc, scores};
use obetrack_core::error::Result;
use obetrack_core::store::Store;

use super::command::{Command, CommandContext};
use super::macros::trace_command;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let cli = ctx.cli;
        let result = match self {
            Commands::Init => init::execute(cli, ctx.root),
            Commands::Term(cmd) => execute_term(cli, &ctx.discover_or_open_store()?, cmd),
            Commands::Program(cmd) => execute_program(cli, &ctx.discover_or_open_store()?, cmd),
            Commands::Course(cmd) => execute_course(cli, &ctx.discover_or_open_store()?, cmd),
            Commands::Lo(cmd) => execute_lo(cli, &ctx.discover_or_open_store()?, cmd),
            Commands::Po(cmd) => execute_po(cli, &ctx.discover_or_open_store()?, cmd),
            Commands::Student(cmd) => execute_student(cli, &ctx.discover_or_open_store()?, cmd),
            Commands::Assessment(cmd) => {
                execute_assessment(cli, &ctx.discover_or_open_store()?, cmd)
            }
            Commands::Map(cmd) => execute_map(cli, &ctx.discover_or_open_store()?, cmd),
            Commands::Enroll { student, course } => {
                enroll::enroll(cli, &ctx.discover_or_open_store()?, *student, *course)
            }
            Commands::EnrollBulk { course, students } => {
                enroll::enroll_bulk(cli, &ctx.discover_or_open_store()?, *course, students)
            }
            Commands::Unenroll { student, course } => {
                enroll::unenroll(cli, &ctx.discover_or_open_store()?, *student, *course)
            }
            Commands::Grade(cmd) => execute_grade(cli, &ctx.discover_or_open_store()?, cmd),
            Commands::Recalc(cmd) => execute_recalc(cli, &ctx.discover_or_open_store()?, cmd),
            Commands::Scores(cmd) => execute_scores(cli, &ctx.discover_or_open_store()?, cmd),
        };
        trace_command!(cli, ctx.start, "execute_command");
        result
    }
}

fn execute_term(cli: &Cli, store: &Store, cmd: &TermCommands) -> Result<()> {
    match cmd {
        TermCommands::Add { name, active } => catalog::term_add(cli, store, name, *active),
        TermCommands::List {} => catalog::term_list(cli, store),
        TermCommands::Activate { term } => catalog::term_activate(cli, store, *term),
    }
}

fn execute_program(cli: &Cli, store: &Store, cmd: &ProgramCommands) -> Result<()> {
    match cmd {
        ProgramCommands::Add { code, name } => catalog::program_add(cli, store, code, name),
        ProgramCommands::List {} => catalog::program_list(cli, store),
    }
}

fn execute_course(cli: &Cli, store: &Store, cmd: &CourseCommands) -> Result<()> {
    match cmd {
        CourseCommands::Add {
            code,
            name,
            program,
            term,
            credits,
        } => catalog::course_add(cli, store, code, name, *program, *term, *credits),
        CourseCommands::List { program, term } => {
            catalog::course_list(cli, store, *program, *term)
        }
    }
}

fn execute_lo(cli: &Cli, store: &Store, cmd: &LoCommands) -> Result<()> {
    match cmd {
        LoCommands::Add {
            course,
            code,
            description,
        } => catalog::lo_add(cli, store, *course, code, description),
        LoCommands::List { course } => catalog::lo_list(cli, store, *course),
    }
}

fn execute_po(cli: &Cli, store: &Store, cmd: &PoCommands) -> Result<()> {
    match cmd {
        PoCommands::Add {
            program,
            term,
            code,
            description,
        } => catalog::po_add(cli, store, *program, *term, code, description),
        PoCommands::List { program, term } => catalog::po_list(cli, store, *program, *term),
    }
}

fn execute_student(cli: &Cli, store: &Store, cmd: &StudentCommands) -> Result<()> {
    match cmd {
        StudentCommands::Add { username, name } => {
            catalog::student_add(cli, store, username, name.as_deref())
        }
        StudentCommands::List {} => catalog::student_list(cli, store),
    }
}

fn execute_assessment(cli: &Cli, store: &Store, cmd: &AssessmentCommands) -> Result<()> {
    match cmd {
        AssessmentCommands::Add {
            course,
            name,
            kind,
            total,
            weight,
            date,
        } => assessment::add(
            cli,
            store,
            &obetrack_core::db::NewAssessment {
                course_id: *course,
                name,
                kind: *kind,
                total_score: *total,
                weight: *weight,
                date: *date,
            },
        ),
        AssessmentCommands::List { course } => assessment::list(cli, store, *course),
        AssessmentCommands::SetWeight { assessment, weight } => {
            assessment::set_weight(cli, store, *assessment, *weight)
        }
        AssessmentCommands::Delete { assessment } => assessment::delete(cli, store, *assessment),
    }
}

fn execute_map(cli: &Cli, store: &Store, cmd: &MapCommands) -> Result<()> {
    match cmd {
        MapCommands::AssessmentLo {
            assessment,
            learning_outcome,
            weight,
            remove,
        } => mapping::assessment_lo(cli, store, *assessment, *learning_outcome, *weight, *remove),
        MapCommands::LoPo {
            learning_outcome,
            program_outcome,
            weight,
            remove,
        } => mapping::lo_po(cli, store, *learning_outcome, *program_outcome, *weight, *remove),
    }
}

fn execute_grade(cli: &Cli, store: &Store, cmd: &GradeCommands) -> Result<()> {
    match cmd {
        GradeCommands::Set {
            student,
            assessment,
            score,
        } => grade::set(cli, store, *student, *assessment, *score),
        GradeCommands::Delete {
            student,
            assessment,
        } => grade::delete(cli, store, *student, *assessment),
    }
}

fn execute_recalc(cli: &Cli, store: &Store, cmd: &RecalcCommands) -> Result<()> {
    match cmd {
        RecalcCommands::Course { course } => recalc::course(cli, store, *course),
        RecalcCommands::Student {
            student,
            program,
            term,
        } => recalc::student(cli, store, *student, *program, *term),
        RecalcCommands::All {} => recalc::all(cli, store),
    }
}

fn execute_scores(cli: &Cli, store: &Store, cmd: &ScoresCommands) -> Result<()> {
    match cmd {
        ScoresCommands::Lo { course, student } => scores::lo(cli, store, *course, *student),
        ScoresCommands::Po {
            student,
            program,
            term,
        } => scores::po(cli, store, *student, *program, *term),
    }
}
