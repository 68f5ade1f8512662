//! `obetrack recalc` - explicit recalculation
//!
//! Runs regardless of `auto_recalculate`, so a store loaded with automatic
//! recalculation off can be brought up to date in one pass.

use crate::cli::Cli;
use crate::commands::output::{output_by_format_result, print_json};
use obetrack_core::error::Result;
use obetrack_core::model::{CourseId, ProgramId, StudentId, TermId};
use obetrack_core::scoring::{RecalcSummary, ScoreEngine};
use obetrack_core::store::Store;

fn report(cli: &Cli, summary: &RecalcSummary) -> Result<()> {
    output_by_format_result!(cli.format,
        json => print_json(&serde_json::json!({
            "status": "ok",
            "recalculated": summary,
        })),
        human => {
            if !cli.quiet {
                println!(
                    "Recalculated {} course(s), {} student program scope(s): {} LO score(s), {} PO score(s)",
                    summary.courses, summary.program_scopes, summary.lo_scores, summary.po_scores
                );
            }
        }
    )
}

pub fn course(cli: &Cli, store: &Store, course: CourseId) -> Result<()> {
    let summary = ScoreEngine::new(store.db()).recalculate_course(course)?;
    report(cli, &summary)
}

pub fn student(
    cli: &Cli,
    store: &Store,
    student: StudentId,
    program: ProgramId,
    term: Option<TermId>,
) -> Result<()> {
    let term = store.resolve_term(term)?;
    let summary = ScoreEngine::new(store.db())
        .recalculate_student_program_scores(student, program, term.id)?;
    report(cli, &summary)
}

pub fn all(cli: &Cli, store: &Store) -> Result<()> {
    let summary = ScoreEngine::new(store.db()).recalculate_all()?;
    report(cli, &summary)
}
