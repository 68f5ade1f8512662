//! Academic structure commands: terms, programs, courses, outcomes, students
//!
//! None of these writes touch a fact the derived scores depend on, so they
//! never trigger a recalculation.

use crate::cli::Cli;
use crate::commands::output::{output_by_format_result, print_json};
use obetrack_core::error::Result;
use obetrack_core::model::{CourseId, ProgramId, TermId};
use obetrack_core::store::Store;

pub fn term_add(cli: &Cli, store: &Store, name: &str, active: bool) -> Result<()> {
    let term = store.db().create_term(name, active)?;
    output_by_format_result!(cli.format,
        json => print_json(&term),
        human => {
            let marker = if term.is_active { " (active)" } else { "" };
            println!("Created term {}: {}{}", term.id, term.name, marker);
        }
    )
}

pub fn term_list(cli: &Cli, store: &Store) -> Result<()> {
    let terms = store.db().list_terms()?;
    output_by_format_result!(cli.format,
        json => print_json(&terms),
        human => {
            if terms.is_empty() && !cli.quiet {
                println!("No terms");
            }
            for term in &terms {
                let marker = if term.is_active { "*" } else { " " };
                println!("{} {:>4}  {}", marker, term.id, term.name);
            }
        }
    )
}

pub fn term_activate(cli: &Cli, store: &Store, id: TermId) -> Result<()> {
    let term = store.db().set_active_term(id)?;
    output_by_format_result!(cli.format,
        json => print_json(&term),
        human => {
            println!("Active term is now {}: {}", term.id, term.name);
        }
    )
}

pub fn program_add(cli: &Cli, store: &Store, code: &str, name: &str) -> Result<()> {
    let program = store.db().create_program(code, name)?;
    output_by_format_result!(cli.format,
        json => print_json(&program),
        human => {
            println!("Created program {}: {} {}", program.id, program.code, program.name);
        }
    )
}

pub fn program_list(cli: &Cli, store: &Store) -> Result<()> {
    let programs = store.db().list_programs()?;
    output_by_format_result!(cli.format,
        json => print_json(&programs),
        human => {
            for program in &programs {
                println!("{:>4}  {:<10} {}", program.id, program.code, program.name);
            }
        }
    )
}

pub fn course_add(
    cli: &Cli,
    store: &Store,
    code: &str,
    name: &str,
    program: ProgramId,
    term: Option<TermId>,
    credits: u32,
) -> Result<()> {
    let term = store.resolve_term(term)?;
    let course = store
        .db()
        .create_course(code, name, credits, program, term.id)?;
    output_by_format_result!(cli.format,
        json => print_json(&course),
        human => {
            println!(
                "Created course {}: {} {} ({})",
                course.id, course.code, course.name, term.name
            );
        }
    )
}

pub fn course_list(
    cli: &Cli,
    store: &Store,
    program: Option<ProgramId>,
    term: Option<TermId>,
) -> Result<()> {
    let courses = store.db().list_courses(program, term)?;
    output_by_format_result!(cli.format,
        json => print_json(&courses),
        human => {
            for course in &courses {
                println!(
                    "{:>4}  {:<10} {:<30} program {} term {} credits {}",
                    course.id,
                    course.code,
                    course.name,
                    course.program_id,
                    course.term_id,
                    course.credits
                );
            }
        }
    )
}

pub fn lo_add(
    cli: &Cli,
    store: &Store,
    course: CourseId,
    code: &str,
    description: &str,
) -> Result<()> {
    let outcome = store
        .db()
        .create_learning_outcome(course, code, description)?;
    output_by_format_result!(cli.format,
        json => print_json(&outcome),
        human => {
            println!(
                "Created learning outcome {}: {} (course {})",
                outcome.id, outcome.code, outcome.course_id
            );
            if !cli.quiet {
                println!(
                    "Enrolled students are scored on it at the next recalculation (`obetrack recalc course {}`)",
                    outcome.course_id
                );
            }
        }
    )
}

pub fn lo_list(cli: &Cli, store: &Store, course: CourseId) -> Result<()> {
    store.db().get_course(course)?;
    let outcomes = store.db().list_learning_outcomes(course)?;
    output_by_format_result!(cli.format,
        json => print_json(&outcomes),
        human => {
            for outcome in &outcomes {
                println!("{:>4}  {:<8} {}", outcome.id, outcome.code, outcome.description);
            }
        }
    )
}

pub fn po_add(
    cli: &Cli,
    store: &Store,
    program: ProgramId,
    term: Option<TermId>,
    code: &str,
    description: &str,
) -> Result<()> {
    let term = store.resolve_term(term)?;
    let outcome = store
        .db()
        .create_program_outcome(program, term.id, code, description)?;
    output_by_format_result!(cli.format,
        json => print_json(&outcome),
        human => {
            println!(
                "Created program outcome {}: {} (program {}, {})",
                outcome.id, outcome.code, outcome.program_id, term.name
            );
            if !cli.quiet {
                println!(
                    "Students are scored on it at the next recalculation (`obetrack recalc all`)"
                );
            }
        }
    )
}

pub fn po_list(cli: &Cli, store: &Store, program: ProgramId, term: Option<TermId>) -> Result<()> {
    let term = store.resolve_term(term)?;
    store.db().get_program(program)?;
    let outcomes = store.db().list_program_outcomes(program, term.id)?;
    output_by_format_result!(cli.format,
        json => print_json(&outcomes),
        human => {
            for outcome in &outcomes {
                println!("{:>4}  {:<8} {}", outcome.id, outcome.code, outcome.description);
            }
        }
    )
}

pub fn student_add(
    cli: &Cli,
    store: &Store,
    username: &str,
    full_name: Option<&str>,
) -> Result<()> {
    let student = store.db().create_student(username, full_name)?;
    output_by_format_result!(cli.format,
        json => print_json(&student),
        human => {
            println!("Created student {}: {}", student.id, student.username);
        }
    )
}

pub fn student_list(cli: &Cli, store: &Store) -> Result<()> {
    let students = store.db().list_students()?;
    output_by_format_result!(cli.format,
        json => print_json(&students),
        human => {
            for student in &students {
                println!(
                    "{:>4}  {:<16} {}",
                    student.id,
                    student.username,
                    student.full_name.as_deref().unwrap_or("")
                );
            }
        }
    )
}
