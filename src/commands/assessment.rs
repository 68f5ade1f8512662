//! Assessment commands

use crate::cli::Cli;
use crate::commands::output::{
    mutation_json, output_by_format_result, print_json, print_recalc_human,
};
use obetrack_core::db::NewAssessment;
use obetrack_core::error::Result;
use obetrack_core::model::{AssessmentId, CourseId};
use obetrack_core::scoring::RecalcEvent;
use obetrack_core::store::Store;

/// Create an assessment. Without mappings or grades it cannot move any score.
pub fn add(cli: &Cli, store: &Store, new: &NewAssessment<'_>) -> Result<()> {
    let assessment = store.db().create_assessment(new)?;
    output_by_format_result!(cli.format,
        json => print_json(&assessment),
        human => {
            println!(
                "Created assessment {}: {} ({}, out of {})",
                assessment.id, assessment.name, assessment.kind, assessment.total_score
            );
        }
    )
}

pub fn list(cli: &Cli, store: &Store, course: CourseId) -> Result<()> {
    store.db().get_course(course)?;
    let assessments = store.db().list_assessments(course)?;
    output_by_format_result!(cli.format,
        json => print_json(&assessments),
        human => {
            for a in &assessments {
                let date = a.date.map(|d| d.to_string()).unwrap_or_default();
                println!(
                    "{:>4}  {:<20} {:<10} total {:>4}  weight {:.2}  {}",
                    a.id, a.name, a.kind, a.total_score, a.weight, date
                );
            }
        }
    )
}

pub fn set_weight(cli: &Cli, store: &Store, id: AssessmentId, weight: f64) -> Result<()> {
    let previous = store.db().set_assessment_weight(id, weight)?;
    let assessment = store.db().get_assessment(id)?;

    let summary = if previous != weight {
        store.recalculate(RecalcEvent::AssessmentWeightChanged {
            course_id: assessment.course_id,
        })?
    } else {
        None
    };

    output_by_format_result!(cli.format,
        json => print_json(&mutation_json("assessment", &assessment, summary.as_ref())?),
        human => {
            println!(
                "Assessment {} weight {:.2} -> {:.2}",
                assessment.id, previous, assessment.weight
            );
            if previous != weight {
                print_recalc_human(cli, summary.as_ref());
            }
        }
    )
}

pub fn delete(cli: &Cli, store: &Store, id: AssessmentId) -> Result<()> {
    let assessment = store.db().delete_assessment(id)?;
    let summary = store.recalculate(RecalcEvent::AssessmentDeleted {
        course_id: assessment.course_id,
    })?;

    output_by_format_result!(cli.format,
        json => print_json(&mutation_json("assessment", &assessment, summary.as_ref())?),
        human => {
            println!("Deleted assessment {}: {}", assessment.id, assessment.name);
            print_recalc_human(cli, summary.as_ref());
        }
    )
}
