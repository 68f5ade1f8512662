//! Program score aggregator: LO scores across courses → per-student PO scores
//!
//! For one student in one program/term, each PO aggregates every LO→PO
//! mapping of every course the student takes in that program/term:
//!
//! ```text
//! po_score = Σ lo_score(s, m.lo) · m.weight / Σ m.weight
//! ```
//!
//! An LO with no stored score for the student contributes 0. Every PO of the
//! scope gets a row, including POs nothing maps to.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::model::{
    LearningOutcomeId, LoPoMapping, ProgramOutcomeId, StudentId, StudentPoScore, TermId,
};

use super::weighted_average;

/// Source facts for one (student, program, term) scope
#[derive(Debug, Clone, Default)]
pub struct ProgramInputs {
    /// Every PO of the program/term
    pub program_outcomes: Vec<ProgramOutcomeId>,
    /// LO→PO mappings of the student's enrolled courses in the program/term
    pub mappings: Vec<LoPoMapping>,
    /// The student's stored LO scores
    pub lo_scores: HashMap<LearningOutcomeId, f64>,
}

/// Compute a fresh PO score for every PO of the scope, in PO order
pub fn compute_po_scores(
    student_id: StudentId,
    term_id: TermId,
    inputs: &ProgramInputs,
) -> Vec<StudentPoScore> {
    let in_scope: HashSet<ProgramOutcomeId> = inputs.program_outcomes.iter().copied().collect();

    let mut by_outcome: BTreeMap<ProgramOutcomeId, Vec<&LoPoMapping>> = BTreeMap::new();
    for mapping in &inputs.mappings {
        if in_scope.contains(&mapping.program_outcome_id) {
            by_outcome
                .entry(mapping.program_outcome_id)
                .or_default()
                .push(mapping);
        }
    }

    inputs
        .program_outcomes
        .iter()
        .map(|&program_outcome_id| {
            let score = by_outcome
                .get(&program_outcome_id)
                .map(|mappings| {
                    weighted_average(mappings.iter().map(|m| {
                        let lo_score = inputs
                            .lo_scores
                            .get(&m.learning_outcome_id)
                            .copied()
                            .unwrap_or(0.0);
                        (lo_score, m.weight)
                    }))
                })
                .unwrap_or(0.0);

            StudentPoScore {
                student_id,
                program_outcome_id,
                term_id,
                score,
            }
        })
        .collect()
}
