//! Recalculation trigger: upstream mutations → engine calls
//!
//! The write path emits one [`RecalcEvent`] after each mutation of a source
//! fact. [`RecalcEvent::plan`] maps it to the minimal scope that must be
//! recomputed; course recalculation already cascades to the PO scores of every
//! enrolled student, so LO scores are always fresh before PO aggregation reads
//! them.

use serde::Serialize;

use crate::error::Result;
use crate::model::{CourseId, StudentId};

use super::{OutcomeStore, RecalcSummary, ScoreEngine};

/// A change to a source fact the derived scores depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RecalcEvent {
    /// A grade was created, updated, or deleted
    GradeChanged { course_id: CourseId },
    /// An assessment (with its grades and mappings) was deleted
    AssessmentDeleted { course_id: CourseId },
    /// An assessment's course-grade weight was edited
    AssessmentWeightChanged { course_id: CourseId },
    /// An assessment→LO mapping was created, updated, or deleted
    AssessmentLoMappingChanged { course_id: CourseId },
    /// An LO→PO mapping was created, updated, or deleted
    LoPoMappingChanged { course_id: CourseId },
    /// A student was enrolled in a course
    EnrollmentCreated { course_id: CourseId },
    /// A student was unenrolled; emitted after the enrollment row is gone
    EnrollmentDeleted {
        student_id: StudentId,
        course_id: CourseId,
    },
    /// Several students were enrolled at once; `enrolled` counts new rows
    BulkEnrollment { course_id: CourseId, enrolled: usize },
}

/// One engine call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecalcAction {
    /// Full course recalculation (cascades to PO scores)
    Course(CourseId),
    /// Delete a student's LO scores for a course, then re-aggregate their PO
    /// scores without it
    DropStudentFromCourse {
        student_id: StudentId,
        course_id: CourseId,
    },
}

impl RecalcEvent {
    /// The engine calls this event requires, in execution order
    pub fn plan(&self) -> Vec<RecalcAction> {
        match *self {
            RecalcEvent::GradeChanged { course_id }
            | RecalcEvent::AssessmentDeleted { course_id }
            | RecalcEvent::AssessmentWeightChanged { course_id }
            | RecalcEvent::AssessmentLoMappingChanged { course_id }
            | RecalcEvent::LoPoMappingChanged { course_id }
            | RecalcEvent::EnrollmentCreated { course_id } => vec![RecalcAction::Course(course_id)],
            RecalcEvent::EnrollmentDeleted {
                student_id,
                course_id,
            } => vec![RecalcAction::DropStudentFromCourse {
                student_id,
                course_id,
            }],
            RecalcEvent::BulkEnrollment { enrolled: 0, .. } => Vec::new(),
            RecalcEvent::BulkEnrollment { course_id, .. } => vec![RecalcAction::Course(course_id)],
        }
    }
}

impl<S: OutcomeStore + ?Sized> ScoreEngine<'_, S> {
    /// Run every recalculation an event requires
    #[tracing::instrument(skip(self))]
    pub fn handle(&self, event: RecalcEvent) -> Result<RecalcSummary> {
        let mut summary = RecalcSummary::default();
        for action in event.plan() {
            summary.absorb(match action {
                RecalcAction::Course(course_id) => self.recalculate_course(course_id)?,
                RecalcAction::DropStudentFromCourse {
                    student_id,
                    course_id,
                } => self.drop_student_from_course(student_id, course_id)?,
            });
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COURSE: CourseId = CourseId::new(5);
    const STUDENT: StudentId = StudentId::new(9);

    #[test]
    fn test_source_changes_recalculate_the_course() {
        for event in [
            RecalcEvent::GradeChanged { course_id: COURSE },
            RecalcEvent::AssessmentDeleted { course_id: COURSE },
            RecalcEvent::AssessmentWeightChanged { course_id: COURSE },
            RecalcEvent::AssessmentLoMappingChanged { course_id: COURSE },
            RecalcEvent::LoPoMappingChanged { course_id: COURSE },
            RecalcEvent::EnrollmentCreated { course_id: COURSE },
        ] {
            assert_eq!(event.plan(), vec![RecalcAction::Course(COURSE)], "{event:?}");
        }
    }

    #[test]
    fn test_unenroll_drops_student_scores_only() {
        let event = RecalcEvent::EnrollmentDeleted {
            student_id: STUDENT,
            course_id: COURSE,
        };
        assert_eq!(
            event.plan(),
            vec![RecalcAction::DropStudentFromCourse {
                student_id: STUDENT,
                course_id: COURSE,
            }]
        );
    }

    #[test]
    fn test_bulk_enrollment_recalculates_once() {
        let event = RecalcEvent::BulkEnrollment {
            course_id: COURSE,
            enrolled: 30,
        };
        assert_eq!(event.plan(), vec![RecalcAction::Course(COURSE)]);
    }

    #[test]
    fn test_bulk_enrollment_without_new_students_is_a_no_op() {
        let event = RecalcEvent::BulkEnrollment {
            course_id: COURSE,
            enrolled: 0,
        };
        assert!(event.plan().is_empty());
    }
}
