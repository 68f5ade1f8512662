//! The scoring engine's view of the database

use std::collections::{BTreeMap, HashMap};

use rusqlite::params;

use crate::error::Result;
use crate::model::{
    AssessmentId, Course, CourseId, LearningOutcomeId, LoPoMapping, ProgramId, ProgramOutcomeId,
    StudentId, TermId,
};
use crate::scoring::{OutcomeStore, ScoreBatch};

use super::Database;

impl OutcomeStore for Database {
    fn course(&self, id: CourseId) -> Result<Course> {
        self.get_course(id)
    }

    fn all_courses(&self) -> Result<Vec<Course>> {
        self.list_courses(None, None)
    }

    fn ensure_scope(&self, student: StudentId, program: ProgramId, term: TermId) -> Result<()> {
        self.get_student(student)?;
        self.get_program(program)?;
        self.get_term(term)?;
        Ok(())
    }

    fn enrolled_students(&self, course: CourseId) -> Result<Vec<StudentId>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT student_id FROM enrollments WHERE course_id = ?1 ORDER BY student_id",
        )?;
        let students = stmt
            .query_map(params![course], |r| r.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(students)
    }

    fn learning_outcomes(&self, course: CourseId) -> Result<Vec<LearningOutcomeId>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id FROM learning_outcomes WHERE course_id = ?1 ORDER BY id")?;
        let outcomes = stmt
            .query_map(params![course], |r| r.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(outcomes)
    }

    fn assessment_lo_weights(
        &self,
        course: CourseId,
    ) -> Result<BTreeMap<(AssessmentId, LearningOutcomeId), f64>> {
        Ok(self
            .list_assessment_lo_mappings(course)?
            .into_iter()
            .map(|m| ((m.assessment_id, m.learning_outcome_id), m.weight))
            .collect())
    }

    fn grades(&self, course: CourseId) -> Result<BTreeMap<(StudentId, AssessmentId), f64>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT g.student_id, g.assessment_id, g.score
             FROM grades g
             JOIN assessments a ON a.id = g.assessment_id
             WHERE a.course_id = ?1",
        )?;
        let grades: BTreeMap<(StudentId, AssessmentId), f64> = stmt
            .query_map(params![course], |r| Ok(((r.get(0)?, r.get(1)?), r.get(2)?)))?
            .collect::<rusqlite::Result<_>>()?;
        Ok(grades)
    }

    fn enrolled_courses(
        &self,
        student: StudentId,
        program: ProgramId,
        term: TermId,
    ) -> Result<Vec<CourseId>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT c.id FROM courses c
             JOIN enrollments e ON e.course_id = c.id
             WHERE e.student_id = ?1 AND c.program_id = ?2 AND c.term_id = ?3
             ORDER BY c.id",
        )?;
        let courses = stmt
            .query_map(params![student, program, term], |r| r.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(courses)
    }

    fn program_outcomes(&self, program: ProgramId, term: TermId) -> Result<Vec<ProgramOutcomeId>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id FROM program_outcomes WHERE program_id = ?1 AND term_id = ?2 ORDER BY id",
        )?;
        let outcomes = stmt
            .query_map(params![program, term], |r| r.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(outcomes)
    }

    fn lo_po_weights(&self, course: CourseId) -> Result<Vec<LoPoMapping>> {
        self.list_lo_po_mappings(course)
    }

    fn student_lo_scores(
        &self,
        student: StudentId,
        courses: &[CourseId],
    ) -> Result<HashMap<LearningOutcomeId, f64>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT s.learning_outcome_id, s.score
             FROM student_lo_scores s
             JOIN learning_outcomes lo ON lo.id = s.learning_outcome_id
             WHERE s.student_id = ?1 AND lo.course_id = ?2",
        )?;

        let mut scores = HashMap::new();
        for &course in courses {
            let rows = stmt.query_map(params![student, course], |r| {
                Ok((r.get::<_, LearningOutcomeId>(0)?, r.get::<_, f64>(1)?))
            })?;
            for row in rows {
                let (outcome, score) = row?;
                scores.insert(outcome, score);
            }
        }
        Ok(scores)
    }

    fn scored_program_scopes(&self) -> Result<Vec<(StudentId, ProgramId, TermId)>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT DISTINCT s.student_id, po.program_id, s.term_id
             FROM student_po_scores s
             JOIN program_outcomes po ON po.id = s.program_outcome_id
             ORDER BY s.student_id, po.program_id, s.term_id",
        )?;
        let scopes = stmt
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(scopes)
    }

    fn commit_scores(&self, batch: ScoreBatch) -> Result<()> {
        self.apply_score_batch(&batch)
    }
}
