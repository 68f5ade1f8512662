//! Derived score tables: scope replacement and read-back

use rusqlite::{params, Transaction};
use serde::Serialize;

use crate::error::{ObeError, Result};
use crate::model::{
    CourseId, LearningOutcomeId, ProgramId, ProgramOutcomeId, StudentId, StudentLoScore,
    StudentPoScore, TermId,
};
use crate::scoring::{ScoreBatch, ScoreOp};

use super::Database;

/// An LO score joined with its labels, for listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoScoreView {
    pub student_id: StudentId,
    pub username: String,
    pub learning_outcome_id: LearningOutcomeId,
    pub learning_outcome: String,
    pub course_id: CourseId,
    pub score: f64,
}

/// A PO score joined with its labels, for listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoScoreView {
    pub student_id: StudentId,
    pub username: String,
    pub program_outcome_id: ProgramOutcomeId,
    pub program_outcome: String,
    pub program_id: ProgramId,
    pub term_id: TermId,
    pub score: f64,
}

fn insert_lo_scores(tx: &Transaction<'_>, scores: &[StudentLoScore]) -> Result<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT INTO student_lo_scores (student_id, learning_outcome_id, score) VALUES (?1, ?2, ?3)",
    )?;
    for row in scores {
        stmt.execute(params![row.student_id, row.learning_outcome_id, row.score])?;
    }
    Ok(())
}

fn insert_po_scores(tx: &Transaction<'_>, scores: &[StudentPoScore]) -> Result<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT INTO student_po_scores (student_id, program_outcome_id, term_id, score) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for row in scores {
        stmt.execute(params![
            row.student_id,
            row.program_outcome_id,
            row.term_id,
            row.score
        ])?;
    }
    Ok(())
}

fn apply_op(tx: &Transaction<'_>, op: &ScoreOp) -> Result<()> {
    match op {
        ScoreOp::ReplaceCourseLoScores { course_id, scores } => {
            tx.execute(
                "DELETE FROM student_lo_scores WHERE learning_outcome_id IN
                 (SELECT id FROM learning_outcomes WHERE course_id = ?1)",
                params![course_id],
            )?;
            insert_lo_scores(tx, scores)
        }
        ScoreOp::ReplaceStudentPoScores {
            student_id,
            program_id,
            term_id,
            scores,
        } => {
            tx.execute(
                "DELETE FROM student_po_scores WHERE student_id = ?1 AND term_id = ?3
                 AND program_outcome_id IN
                 (SELECT id FROM program_outcomes WHERE program_id = ?2 AND term_id = ?3)",
                params![student_id, program_id, term_id],
            )?;
            insert_po_scores(tx, scores)
        }
        ScoreOp::DropStudentCourseLoScores {
            student_id,
            course_id,
        } => {
            tx.execute(
                "DELETE FROM student_lo_scores WHERE student_id = ?1 AND learning_outcome_id IN
                 (SELECT id FROM learning_outcomes WHERE course_id = ?2)",
                params![student_id, course_id],
            )?;
            Ok(())
        }
    }
}

impl Database {
    /// Apply a batch of scope replacements in one transaction.
    ///
    /// On any error the transaction is rolled back and the previous scores
    /// stay in place.
    pub fn apply_score_batch(&self, batch: &ScoreBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| ObeError::transaction("replace scores", e))?;
        for op in batch.ops() {
            apply_op(&tx, op)?;
        }
        tx.commit()
            .map_err(|e| ObeError::transaction("replace scores", e))?;
        Ok(())
    }

    /// Stored LO scores of a course, optionally for one student
    pub fn list_lo_scores(
        &self,
        course_id: CourseId,
        student_id: Option<StudentId>,
    ) -> Result<Vec<LoScoreView>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.student_id, st.username, s.learning_outcome_id, lo.code, lo.course_id, s.score
             FROM student_lo_scores s
             JOIN learning_outcomes lo ON lo.id = s.learning_outcome_id
             JOIN students st ON st.id = s.student_id
             WHERE lo.course_id = ?1 AND (?2 IS NULL OR s.student_id = ?2)
             ORDER BY st.username, lo.code",
        )?;
        let rows = stmt
            .query_map(params![course_id, student_id], |row| {
                Ok(LoScoreView {
                    student_id: row.get(0)?,
                    username: row.get(1)?,
                    learning_outcome_id: row.get(2)?,
                    learning_outcome: row.get(3)?,
                    course_id: row.get(4)?,
                    score: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Stored PO scores of a student, optionally narrowed to a program/term
    pub fn list_po_scores(
        &self,
        student_id: StudentId,
        program_id: Option<ProgramId>,
        term_id: Option<TermId>,
    ) -> Result<Vec<PoScoreView>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.student_id, st.username, s.program_outcome_id, po.code, po.program_id, s.term_id, s.score
             FROM student_po_scores s
             JOIN program_outcomes po ON po.id = s.program_outcome_id
             JOIN students st ON st.id = s.student_id
             WHERE s.student_id = ?1
               AND (?2 IS NULL OR po.program_id = ?2)
               AND (?3 IS NULL OR s.term_id = ?3)
             ORDER BY po.program_id, s.term_id, po.code",
        )?;
        let rows = stmt
            .query_map(params![student_id, program_id, term_id], |row| {
                Ok(PoScoreView {
                    student_id: row.get(0)?,
                    username: row.get(1)?,
                    program_outcome_id: row.get(2)?,
                    program_outcome: row.get(3)?,
                    program_id: row.get(4)?,
                    term_id: row.get(5)?,
                    score: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}
