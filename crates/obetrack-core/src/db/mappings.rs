//! LO→PO mappings

use rusqlite::params;

use crate::error::{ObeError, Result};
use crate::model::{validate_weight, CourseId, LearningOutcomeId, LoPoMapping, ProgramOutcomeId};

use super::Database;

impl Database {
    /// Create or update an LO→PO edge.
    ///
    /// The mapping's course is the learning outcome's course; the program
    /// outcome must belong to that course's program and term.
    pub fn upsert_lo_po_mapping(
        &self,
        learning_outcome_id: LearningOutcomeId,
        program_outcome_id: ProgramOutcomeId,
        weight: f64,
    ) -> Result<LoPoMapping> {
        validate_weight("mapping weight", weight)?;
        let outcome = self.get_learning_outcome(learning_outcome_id)?;
        let course = self.get_course(outcome.course_id)?;
        let program_outcome = self.get_program_outcome(program_outcome_id)?;

        if program_outcome.program_id != course.program_id
            || program_outcome.term_id != course.term_id
        {
            crate::bail_constraint!(
                "program outcome {} is not part of program {} / term {} of course {}",
                program_outcome.id,
                course.program_id,
                course.term_id,
                course.id
            );
        }

        self.conn.execute(
            "INSERT INTO lo_po_mappings (course_id, learning_outcome_id, program_outcome_id, weight) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (course_id, learning_outcome_id, program_outcome_id) DO UPDATE SET weight = excluded.weight",
            params![course.id, learning_outcome_id, program_outcome_id, weight],
        )?;

        Ok(LoPoMapping {
            course_id: course.id,
            learning_outcome_id,
            program_outcome_id,
            weight,
        })
    }

    /// Remove an LO→PO edge; returns the mapping's course
    pub fn delete_lo_po_mapping(
        &self,
        learning_outcome_id: LearningOutcomeId,
        program_outcome_id: ProgramOutcomeId,
    ) -> Result<CourseId> {
        let outcome = self.get_learning_outcome(learning_outcome_id)?;
        let removed = self.conn.execute(
            "DELETE FROM lo_po_mappings WHERE learning_outcome_id = ?1 AND program_outcome_id = ?2",
            params![learning_outcome_id, program_outcome_id],
        )?;
        if removed == 0 {
            return Err(ObeError::not_found(
                "LO-PO mapping",
                format!("{}->{}", learning_outcome_id, program_outcome_id),
            ));
        }
        Ok(outcome.course_id)
    }

    pub fn list_lo_po_mappings(&self, course_id: CourseId) -> Result<Vec<LoPoMapping>> {
        let mut stmt = self.conn.prepare(
            "SELECT course_id, learning_outcome_id, program_outcome_id, weight
             FROM lo_po_mappings WHERE course_id = ?1
             ORDER BY learning_outcome_id, program_outcome_id",
        )?;
        let mappings = stmt
            .query_map(params![course_id], |row| {
                Ok(LoPoMapping {
                    course_id: row.get(0)?,
                    learning_outcome_id: row.get(1)?,
                    program_outcome_id: row.get(2)?,
                    weight: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(mappings)
    }
}
