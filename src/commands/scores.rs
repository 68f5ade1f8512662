//! `obetrack scores` - read back derived scores

use crate::cli::Cli;
use crate::commands::output::{output_by_format_result, print_json, score};
use obetrack_core::error::Result;
use obetrack_core::model::{CourseId, ProgramId, StudentId, TermId};
use obetrack_core::store::Store;

pub fn lo(cli: &Cli, store: &Store, course: CourseId, student: Option<StudentId>) -> Result<()> {
    store.db().get_course(course)?;
    if let Some(student) = student {
        store.db().get_student(student)?;
    }
    let rows = store.db().list_lo_scores(course, student)?;

    output_by_format_result!(cli.format,
        json => print_json(&rows),
        human => {
            if rows.is_empty() && !cli.quiet {
                println!("No learning outcome scores for course {}", course);
            }
            for row in &rows {
                println!(
                    "{:<16} {:<8} {:>8}",
                    row.username,
                    row.learning_outcome,
                    score(store, row.score)
                );
            }
        }
    )
}

pub fn po(
    cli: &Cli,
    store: &Store,
    student: StudentId,
    program: Option<ProgramId>,
    term: Option<TermId>,
) -> Result<()> {
    store.db().get_student(student)?;
    let rows = store.db().list_po_scores(student, program, term)?;

    output_by_format_result!(cli.format,
        json => print_json(&rows),
        human => {
            if rows.is_empty() && !cli.quiet {
                println!("No program outcome scores for student {}", student);
            }
            for row in &rows {
                println!(
                    "{:<16} {:<8} term {:<4} {:>8}",
                    row.username,
                    row.program_outcome,
                    row.term_id,
                    score(store, row.score)
                );
            }
        }
    )
}
