//! Mapping graph commands
//!
//! Both edge kinds feed the derived scores, so every edit recalculates the
//! course the edge belongs to.

use crate::cli::Cli;
use crate::commands::output::{
    mutation_json, output_by_format_result, print_json, print_recalc_human,
};
use obetrack_core::error::{ObeError, Result};
use obetrack_core::model::{AssessmentId, LearningOutcomeId, ProgramOutcomeId};
use obetrack_core::scoring::RecalcEvent;
use obetrack_core::store::Store;

fn require_weight(weight: Option<f64>) -> Result<f64> {
    weight.ok_or_else(|| {
        ObeError::UsageError("a weight is required unless --remove is given".to_string())
    })
}

pub fn assessment_lo(
    cli: &Cli,
    store: &Store,
    assessment: AssessmentId,
    learning_outcome: LearningOutcomeId,
    weight: Option<f64>,
    remove: bool,
) -> Result<()> {
    let (course_id, weight) = if remove {
        let course_id = store
            .db()
            .delete_assessment_lo_mapping(assessment, learning_outcome)?;
        (course_id, None)
    } else {
        let weight = require_weight(weight)?;
        store
            .db()
            .upsert_assessment_lo_mapping(assessment, learning_outcome, weight)?;
        (store.db().get_assessment(assessment)?.course_id, Some(weight))
    };

    let summary = store.recalculate(RecalcEvent::AssessmentLoMappingChanged { course_id })?;
    let edge = serde_json::json!({
        "assessment_id": assessment,
        "learning_outcome_id": learning_outcome,
        "course_id": course_id,
        "weight": weight,
    });

    output_by_format_result!(cli.format,
        json => print_json(&mutation_json("mapping", &edge, summary.as_ref())?),
        human => {
            match weight {
                Some(w) => println!(
                    "Mapped assessment {} -> LO {} (weight {:.2})",
                    assessment, learning_outcome, w
                ),
                None => println!(
                    "Removed mapping assessment {} -> LO {}",
                    assessment, learning_outcome
                ),
            }
            print_recalc_human(cli, summary.as_ref());
        }
    )
}

pub fn lo_po(
    cli: &Cli,
    store: &Store,
    learning_outcome: LearningOutcomeId,
    program_outcome: ProgramOutcomeId,
    weight: Option<f64>,
    remove: bool,
) -> Result<()> {
    let (course_id, weight) = if remove {
        let course_id = store
            .db()
            .delete_lo_po_mapping(learning_outcome, program_outcome)?;
        (course_id, None)
    } else {
        let weight = require_weight(weight)?;
        let mapping = store
            .db()
            .upsert_lo_po_mapping(learning_outcome, program_outcome, weight)?;
        (mapping.course_id, Some(mapping.weight))
    };

    let summary = store.recalculate(RecalcEvent::LoPoMappingChanged { course_id })?;
    let edge = serde_json::json!({
        "learning_outcome_id": learning_outcome,
        "program_outcome_id": program_outcome,
        "course_id": course_id,
        "weight": weight,
    });

    output_by_format_result!(cli.format,
        json => print_json(&mutation_json("mapping", &edge, summary.as_ref())?),
        human => {
            match weight {
                Some(w) => println!(
                    "Mapped LO {} -> PO {} (weight {:.2})",
                    learning_outcome, program_outcome, w
                ),
                None => println!(
                    "Removed mapping LO {} -> PO {}",
                    learning_outcome, program_outcome
                ),
            }
            print_recalc_human(cli, summary.as_ref());
        }
    )
}
