//! Academic model: entities, typed ids, and the weight rule shared by both
//! mapping kinds.

pub mod ids;
pub mod types;

pub use ids::{
    AssessmentId, CourseId, LearningOutcomeId, ProgramId, ProgramOutcomeId, StudentId, TermId,
};
pub use types::{
    Assessment, AssessmentLoMapping, AssessmentType, Course, Enrollment, Grade, LearningOutcome,
    LoPoMapping, Program, ProgramOutcome, Student, StudentLoScore, StudentPoScore, Term,
};

use crate::error::Result;

/// Mapping and assessment weights live in [0, 1]
pub fn validate_weight(context: &str, weight: f64) -> Result<f64> {
    if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
        crate::bail_invalid!(context, format!("{} (expected 0.0 to 1.0)", weight));
    }
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_weight_bounds() {
        assert_eq!(validate_weight("weight", 0.0).unwrap(), 0.0);
        assert_eq!(validate_weight("weight", 1.0).unwrap(), 1.0);
        assert!(validate_weight("weight", -0.1).is_err());
        assert!(validate_weight("weight", 1.01).is_err());
        assert!(validate_weight("weight", f64::NAN).is_err());
    }
}
