use std::collections::BTreeSet;
use std::time::Instant;

use serde::Serialize;

use crate::error::Result;
use crate::model::{CourseId, ProgramId, StudentId, TermId};

use super::course::{compute_lo_scores, CourseInputs};
use super::program::{compute_po_scores, ProgramInputs};
use super::{OutcomeStore, ScoreBatch, ScoreOp};

/// What a recalculation wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecalcSummary {
    /// Courses whose LO scores were replaced
    pub courses: usize,
    /// (student, program, term) scopes whose PO scores were replaced
    pub program_scopes: usize,
    /// LO score rows written
    pub lo_scores: usize,
    /// PO score rows written
    pub po_scores: usize,
}

impl RecalcSummary {
    pub fn absorb(&mut self, other: RecalcSummary) {
        self.courses += other.courses;
        self.program_scopes += other.program_scopes;
        self.lo_scores += other.lo_scores;
        self.po_scores += other.po_scores;
    }
}

/// Entry points of the aggregation engine over any [`OutcomeStore`]
pub struct ScoreEngine<'s, S: OutcomeStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: OutcomeStore + ?Sized> ScoreEngine<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Recompute every LO score of the course, then the PO scores of each
    /// enrolled student in the course's program/term.
    #[tracing::instrument(skip(self), fields(course_id = %course_id))]
    pub fn recalculate_course(&self, course_id: CourseId) -> Result<RecalcSummary> {
        let start = Instant::now();
        let course = self.store.course(course_id)?;

        let inputs = CourseInputs {
            students: self.store.enrolled_students(course_id)?,
            learning_outcomes: self.store.learning_outcomes(course_id)?,
            weights: self.store.assessment_lo_weights(course_id)?,
            grades: self.store.grades(course_id)?,
        };
        crate::trace_time!(start, "load_course_inputs");

        let scores = compute_lo_scores(&inputs);
        let mut summary = RecalcSummary {
            courses: 1,
            lo_scores: scores.len(),
            ..Default::default()
        };

        self.store.commit_scores(ScoreBatch::from(ScoreOp::ReplaceCourseLoScores {
            course_id,
            scores,
        }))?;
        tracing::debug!(
            students = inputs.students.len(),
            learning_outcomes = inputs.learning_outcomes.len(),
            rows = summary.lo_scores,
            "replaced course LO scores"
        );

        // LO scores are committed; PO aggregation reads them back
        for &student_id in &inputs.students {
            summary.absorb(self.recalculate_student_program_scores(
                student_id,
                course.program_id,
                course.term_id,
            )?);
        }

        crate::trace_time!(start, "recalculate_course");
        Ok(summary)
    }

    /// Recompute every PO score of `(program, term)` for one student
    #[tracing::instrument(skip(self), fields(student_id = %student_id, program_id = %program_id, term_id = %term_id))]
    pub fn recalculate_student_program_scores(
        &self,
        student_id: StudentId,
        program_id: ProgramId,
        term_id: TermId,
    ) -> Result<RecalcSummary> {
        self.store.ensure_scope(student_id, program_id, term_id)?;
        let courses = self
            .store
            .enrolled_courses(student_id, program_id, term_id)?;
        self.replace_po_scores(student_id, program_id, term_id, &courses, ScoreBatch::new())
    }

    /// Remove a dropped course from a student's derived scores.
    ///
    /// Deletes the student's LO scores for the course and recomputes their PO
    /// scores without it, in one transaction. The course is excluded even if
    /// the enrollment row still exists.
    #[tracing::instrument(skip(self), fields(student_id = %student_id, course_id = %course_id))]
    pub fn drop_student_from_course(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<RecalcSummary> {
        let course = self.store.course(course_id)?;
        self.store
            .ensure_scope(student_id, course.program_id, course.term_id)?;

        let courses: Vec<CourseId> = self
            .store
            .enrolled_courses(student_id, course.program_id, course.term_id)?
            .into_iter()
            .filter(|&c| c != course_id)
            .collect();

        let mut batch = ScoreBatch::new();
        batch.push(ScoreOp::DropStudentCourseLoScores {
            student_id,
            course_id,
        });
        self.replace_po_scores(student_id, course.program_id, course.term_id, &courses, batch)
    }

    /// Recalculate every course in the store, then every stored PO scope no
    /// course recalculation reached.
    ///
    /// A student unenrolled from their last course of a program/term while
    /// events were not applied still has PO rows; those are re-aggregated
    /// from the remaining (possibly empty) course set.
    #[tracing::instrument(skip(self))]
    pub fn recalculate_all(&self) -> Result<RecalcSummary> {
        let mut summary = RecalcSummary::default();
        let mut reached = BTreeSet::new();
        for course in self.store.all_courses()? {
            for student_id in self.store.enrolled_students(course.id)? {
                reached.insert((student_id, course.program_id, course.term_id));
            }
            summary.absorb(self.recalculate_course(course.id)?);
        }

        for (student_id, program_id, term_id) in self.store.scored_program_scopes()? {
            if !reached.contains(&(student_id, program_id, term_id)) {
                summary.absorb(
                    self.recalculate_student_program_scores(student_id, program_id, term_id)?,
                );
            }
        }
        tracing::info!(
            courses = summary.courses,
            lo_scores = summary.lo_scores,
            po_scores = summary.po_scores,
            "recalculated all courses"
        );
        Ok(summary)
    }

    fn replace_po_scores(
        &self,
        student_id: StudentId,
        program_id: ProgramId,
        term_id: TermId,
        courses: &[CourseId],
        mut batch: ScoreBatch,
    ) -> Result<RecalcSummary> {
        let mut mappings = Vec::new();
        for &course_id in courses {
            mappings.extend(self.store.lo_po_weights(course_id)?);
        }

        let inputs = ProgramInputs {
            program_outcomes: self.store.program_outcomes(program_id, term_id)?,
            mappings,
            lo_scores: self.store.student_lo_scores(student_id, courses)?,
        };
        let scores = compute_po_scores(student_id, term_id, &inputs);
        let summary = RecalcSummary {
            program_scopes: 1,
            po_scores: scores.len(),
            ..Default::default()
        };

        batch.push(ScoreOp::ReplaceStudentPoScores {
            student_id,
            program_id,
            term_id,
            scores,
        });
        self.store.commit_scores(batch)?;

        tracing::debug!(
            courses = courses.len(),
            rows = summary.po_scores,
            "replaced student PO scores"
        );
        Ok(summary)
    }
}
