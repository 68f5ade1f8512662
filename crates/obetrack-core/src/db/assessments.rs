//! Assessments, assessment→LO mappings, and grades
//!
//! Write-time validation lives here: grades must fit the assessment's total
//! and belong to an enrolled student, mapping weights must be in [0, 1], and a
//! mapped learning outcome must belong to the assessment's course.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use crate::error::Result;
use crate::model::{
    validate_weight, Assessment, AssessmentId, AssessmentLoMapping, AssessmentType, CourseId,
    Grade, LearningOutcomeId, StudentId,
};

use super::{not_found_or, Database};

const ASSESSMENT_COLUMNS: &str = "id, course_id, name, kind, total_score, weight, date";

fn assessment_from_row(row: &Row) -> rusqlite::Result<Assessment> {
    let kind: String = row.get(3)?;
    let date: Option<String> = row.get(6)?;
    Ok(Assessment {
        id: row.get(0)?,
        course_id: row.get(1)?,
        name: row.get(2)?,
        kind: kind.parse().unwrap_or_default(),
        total_score: row.get(4)?,
        weight: row.get(5)?,
        date: date.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
    })
}

/// Fields for a new assessment
#[derive(Debug, Clone)]
pub struct NewAssessment<'a> {
    pub course_id: CourseId,
    pub name: &'a str,
    pub kind: AssessmentType,
    pub total_score: u32,
    pub weight: f64,
    pub date: Option<NaiveDate>,
}

impl Database {
    // ------------------------------------------------------------------
    // Assessments
    // ------------------------------------------------------------------

    pub fn create_assessment(&self, new: &NewAssessment<'_>) -> Result<Assessment> {
        if new.name.trim().is_empty() {
            crate::bail_invalid!("assessment name", "(empty)");
        }
        if new.total_score == 0 {
            crate::bail_invalid!("total score", "0 (must be positive)");
        }
        validate_weight("assessment weight", new.weight)?;
        self.get_course(new.course_id)?;

        self.conn.execute(
            "INSERT INTO assessments (course_id, name, kind, total_score, weight, date) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.course_id,
                new.name,
                new.kind.as_str(),
                new.total_score,
                new.weight,
                new.date.map(|d| d.format("%Y-%m-%d").to_string()),
            ],
        )?;
        let id = AssessmentId::new(self.conn.last_insert_rowid());
        tracing::debug!(assessment_id = %id, course_id = %new.course_id, "created assessment");
        self.get_assessment(id)
    }

    pub fn get_assessment(&self, id: AssessmentId) -> Result<Assessment> {
        not_found_or(
            self.conn.query_row(
                &format!("SELECT {} FROM assessments WHERE id = ?1", ASSESSMENT_COLUMNS),
                params![id],
                assessment_from_row,
            ),
            "assessment",
            id,
        )
    }

    pub fn list_assessments(&self, course_id: CourseId) -> Result<Vec<Assessment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM assessments WHERE course_id = ?1 ORDER BY date, id",
            ASSESSMENT_COLUMNS
        ))?;
        let assessments = stmt
            .query_map(params![course_id], assessment_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(assessments)
    }

    /// Change an assessment's course-grade weight.
    ///
    /// Returns the previous weight so the caller can tell whether it changed.
    pub fn set_assessment_weight(&self, id: AssessmentId, weight: f64) -> Result<f64> {
        validate_weight("assessment weight", weight)?;
        let previous = self.get_assessment(id)?.weight;
        self.conn.execute(
            "UPDATE assessments SET weight = ?1 WHERE id = ?2",
            params![weight, id],
        )?;
        Ok(previous)
    }

    /// Delete an assessment with its grades and LO mappings.
    ///
    /// Returns the deleted assessment so the caller knows which course to
    /// recalculate.
    pub fn delete_assessment(&self, id: AssessmentId) -> Result<Assessment> {
        let assessment = self.get_assessment(id)?;
        self.conn
            .execute("DELETE FROM assessments WHERE id = ?1", params![id])?;
        tracing::debug!(assessment_id = %id, "deleted assessment");
        Ok(assessment)
    }

    // ------------------------------------------------------------------
    // Assessment → LO mappings
    // ------------------------------------------------------------------

    /// Create or update the weight of an assessment→LO edge
    pub fn upsert_assessment_lo_mapping(
        &self,
        assessment_id: AssessmentId,
        learning_outcome_id: LearningOutcomeId,
        weight: f64,
    ) -> Result<AssessmentLoMapping> {
        validate_weight("mapping weight", weight)?;
        let assessment = self.get_assessment(assessment_id)?;
        let outcome = self.get_learning_outcome(learning_outcome_id)?;
        if outcome.course_id != assessment.course_id {
            crate::bail_constraint!(
                "learning outcome {} belongs to course {}, assessment {} to course {}",
                outcome.id,
                outcome.course_id,
                assessment.id,
                assessment.course_id
            );
        }

        self.conn.execute(
            "INSERT INTO assessment_lo_mappings (assessment_id, learning_outcome_id, weight) VALUES (?1, ?2, ?3)
             ON CONFLICT (assessment_id, learning_outcome_id) DO UPDATE SET weight = excluded.weight",
            params![assessment_id, learning_outcome_id, weight],
        )?;

        Ok(AssessmentLoMapping {
            assessment_id,
            learning_outcome_id,
            weight,
        })
    }

    /// Remove an assessment→LO edge; returns the assessment's course
    pub fn delete_assessment_lo_mapping(
        &self,
        assessment_id: AssessmentId,
        learning_outcome_id: LearningOutcomeId,
    ) -> Result<CourseId> {
        let assessment = self.get_assessment(assessment_id)?;
        let removed = self.conn.execute(
            "DELETE FROM assessment_lo_mappings WHERE assessment_id = ?1 AND learning_outcome_id = ?2",
            params![assessment_id, learning_outcome_id],
        )?;
        if removed == 0 {
            return Err(crate::error::ObeError::not_found(
                "assessment-LO mapping",
                format!("{}->{}", assessment_id, learning_outcome_id),
            ));
        }
        Ok(assessment.course_id)
    }

    pub fn list_assessment_lo_mappings(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<AssessmentLoMapping>> {
        let mut stmt = self.conn.prepare(
            "SELECT m.assessment_id, m.learning_outcome_id, m.weight
             FROM assessment_lo_mappings m
             JOIN assessments a ON a.id = m.assessment_id
             WHERE a.course_id = ?1
             ORDER BY m.assessment_id, m.learning_outcome_id",
        )?;
        let mappings = stmt
            .query_map(params![course_id], |row| {
                Ok(AssessmentLoMapping {
                    assessment_id: row.get(0)?,
                    learning_outcome_id: row.get(1)?,
                    weight: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(mappings)
    }

    // ------------------------------------------------------------------
    // Grades
    // ------------------------------------------------------------------

    /// Record (or overwrite) a student's grade on an assessment.
    ///
    /// Returns the assessment's course, which the caller recalculates.
    pub fn upsert_grade(
        &self,
        student_id: StudentId,
        assessment_id: AssessmentId,
        score: f64,
    ) -> Result<CourseId> {
        let assessment = self.get_assessment(assessment_id)?;
        self.get_student(student_id)?;

        if !score.is_finite() || score < 0.0 {
            crate::bail_invalid!("score", score);
        }
        if score > f64::from(assessment.total_score) {
            crate::bail_constraint!(
                "score {} exceeds total {} of assessment {}",
                score,
                assessment.total_score,
                assessment.id
            );
        }
        if !self.is_enrolled(student_id, assessment.course_id)? {
            crate::bail_constraint!(
                "student {} is not enrolled in course {}",
                student_id,
                assessment.course_id
            );
        }

        self.conn.execute(
            "INSERT INTO grades (student_id, assessment_id, score) VALUES (?1, ?2, ?3)
             ON CONFLICT (student_id, assessment_id) DO UPDATE SET score = excluded.score",
            params![student_id, assessment_id, score],
        )?;
        Ok(assessment.course_id)
    }

    /// Delete a grade; returns the assessment's course
    pub fn delete_grade(&self, student_id: StudentId, assessment_id: AssessmentId) -> Result<CourseId> {
        let assessment = self.get_assessment(assessment_id)?;
        let removed = self.conn.execute(
            "DELETE FROM grades WHERE student_id = ?1 AND assessment_id = ?2",
            params![student_id, assessment_id],
        )?;
        if removed == 0 {
            return Err(crate::error::ObeError::not_found(
                "grade",
                format!("student {} on assessment {}", student_id, assessment_id),
            ));
        }
        Ok(assessment.course_id)
    }

    pub fn get_grade(
        &self,
        student_id: StudentId,
        assessment_id: AssessmentId,
    ) -> Result<Option<Grade>> {
        let score: Option<f64> = self
            .conn
            .query_row(
                "SELECT score FROM grades WHERE student_id = ?1 AND assessment_id = ?2",
                params![student_id, assessment_id],
                |r| r.get(0),
            )
            .optional()?;
        Ok(score.map(|score| Grade {
            student_id,
            assessment_id,
            score,
        }))
    }
}
