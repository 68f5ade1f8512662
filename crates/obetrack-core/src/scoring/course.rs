//! Course score calculator: grades → per-student LO scores
//!
//! For every enrolled student and every LO of the course:
//!
//! ```text
//! lo_score = Σ grade(s, a) · w(a, lo) / Σ w(a, lo)     over a with w(a, lo) > 0
//! ```
//!
//! A missing grade on a contributing assessment counts as 0 and its weight
//! stays in the denominator. An LO with no contributing assessment scores 0.

use std::collections::BTreeMap;

use crate::model::{AssessmentId, LearningOutcomeId, StudentId, StudentLoScore};

use super::weighted_average;

/// Source facts for one course, as loaded from the store
#[derive(Debug, Clone, Default)]
pub struct CourseInputs {
    pub students: Vec<StudentId>,
    pub learning_outcomes: Vec<LearningOutcomeId>,
    pub weights: BTreeMap<(AssessmentId, LearningOutcomeId), f64>,
    pub grades: BTreeMap<(StudentId, AssessmentId), f64>,
}

impl CourseInputs {
    /// Contributing `(assessment, weight)` pairs per LO, in assessment order
    fn contributions(&self) -> BTreeMap<LearningOutcomeId, Vec<(AssessmentId, f64)>> {
        let mut by_outcome: BTreeMap<LearningOutcomeId, Vec<(AssessmentId, f64)>> =
            BTreeMap::new();
        for (&(assessment, outcome), &weight) in &self.weights {
            if weight > 0.0 {
                by_outcome
                    .entry(outcome)
                    .or_default()
                    .push((assessment, weight));
            }
        }
        by_outcome
    }
}

/// Compute a fresh LO score for every (student, LO) pair of the course.
///
/// Output is ordered by student, then by LO in `inputs.learning_outcomes`
/// order, and is identical across calls for identical inputs.
pub fn compute_lo_scores(inputs: &CourseInputs) -> Vec<StudentLoScore> {
    let contributions = inputs.contributions();
    let mut scores = Vec::with_capacity(inputs.students.len() * inputs.learning_outcomes.len());

    for &student_id in &inputs.students {
        for &learning_outcome_id in &inputs.learning_outcomes {
            let score = contributions
                .get(&learning_outcome_id)
                .map(|pairs| {
                    weighted_average(pairs.iter().map(|&(assessment, weight)| {
                        let grade = inputs
                            .grades
                            .get(&(student_id, assessment))
                            .copied()
                            .unwrap_or(0.0);
                        (grade, weight)
                    }))
                })
                .unwrap_or(0.0);

            scores.push(StudentLoScore {
                student_id,
                learning_outcome_id,
                score,
            });
        }
    }

    scores
}
