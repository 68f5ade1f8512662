//! Grade commands

use crate::cli::Cli;
use crate::commands::output::{
    mutation_json, output_by_format_result, print_json, print_recalc_human,
};
use obetrack_core::error::Result;
use obetrack_core::model::{AssessmentId, Grade, StudentId};
use obetrack_core::scoring::RecalcEvent;
use obetrack_core::store::Store;

pub fn set(
    cli: &Cli,
    store: &Store,
    student: StudentId,
    assessment: AssessmentId,
    score: f64,
) -> Result<()> {
    let course_id = store.db().upsert_grade(student, assessment, score)?;
    let summary = store.recalculate(RecalcEvent::GradeChanged { course_id })?;
    let grade = Grade {
        student_id: student,
        assessment_id: assessment,
        score,
    };

    output_by_format_result!(cli.format,
        json => print_json(&mutation_json("grade", &grade, summary.as_ref())?),
        human => {
            println!(
                "Recorded grade {} for student {} on assessment {}",
                score, student, assessment
            );
            print_recalc_human(cli, summary.as_ref());
        }
    )
}

pub fn delete(cli: &Cli, store: &Store, student: StudentId, assessment: AssessmentId) -> Result<()> {
    let course_id = store.db().delete_grade(student, assessment)?;
    let summary = store.recalculate(RecalcEvent::GradeChanged { course_id })?;

    let grade = serde_json::json!({
        "student_id": student,
        "assessment_id": assessment,
    });

    output_by_format_result!(cli.format,
        json => print_json(&mutation_json("grade", &grade, summary.as_ref())?),
        human => {
            println!("Deleted grade of student {} on assessment {}", student, assessment);
            print_recalc_human(cli, summary.as_ref());
        }
    )
}
