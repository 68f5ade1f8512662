//! Enrollment registry

use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::error::{ObeError, Result};
use crate::model::{Course, CourseId, Enrollment, StudentId};

use super::Database;

/// Outcome of a bulk enrollment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkEnrollment {
    /// Students enrolled by this call
    pub enrolled: Vec<StudentId>,
    /// Students that were already enrolled
    pub already_enrolled: Vec<StudentId>,
}

impl Database {
    pub fn is_enrolled(&self, student_id: StudentId, course_id: CourseId) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM enrollments WHERE student_id = ?1 AND course_id = ?2",
            params![student_id, course_id],
            |r| r.get(0),
        )?;
        Ok(count > 0)
    }

    /// Enroll a student; returns false if the enrollment already existed
    pub fn enroll(&self, student_id: StudentId, course_id: CourseId) -> Result<bool> {
        self.get_student(student_id)?;
        self.get_course(course_id)?;
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO enrollments (student_id, course_id, enrolled_at) VALUES (?1, ?2, ?3)",
            params![student_id, course_id, Utc::now().to_rfc3339()],
        )?;
        Ok(inserted > 0)
    }

    /// Enroll many students in one course inside a single transaction
    pub fn enroll_many(&self, course_id: CourseId, students: &[StudentId]) -> Result<BulkEnrollment> {
        self.get_course(course_id)?;
        for student_id in students {
            self.get_student(*student_id)?;
        }

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| ObeError::transaction("bulk enroll", e))?;
        let now = Utc::now().to_rfc3339();
        let mut outcome = BulkEnrollment::default();
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO enrollments (student_id, course_id, enrolled_at) VALUES (?1, ?2, ?3)",
            )?;
            for student_id in students {
                if stmt.execute(params![student_id, course_id, now])? > 0 {
                    outcome.enrolled.push(*student_id);
                } else if !outcome.enrolled.contains(student_id) {
                    outcome.already_enrolled.push(*student_id);
                }
            }
        }
        tx.commit()
            .map_err(|e| ObeError::transaction("bulk enroll", e))?;

        tracing::debug!(
            course_id = %course_id,
            enrolled = outcome.enrolled.len(),
            skipped = outcome.already_enrolled.len(),
            "bulk enrollment"
        );
        Ok(outcome)
    }

    /// Remove an enrollment; returns the course it belonged to.
    ///
    /// Grades the student earned in the course are left in place. Derived
    /// scores are the scoring engine's concern.
    pub fn unenroll(&self, student_id: StudentId, course_id: CourseId) -> Result<Course> {
        let course = self.get_course(course_id)?;
        let removed = self.conn.execute(
            "DELETE FROM enrollments WHERE student_id = ?1 AND course_id = ?2",
            params![student_id, course_id],
        )?;
        if removed == 0 {
            return Err(ObeError::not_found(
                "enrollment",
                format!("student {} in course {}", student_id, course_id),
            ));
        }
        Ok(course)
    }

    pub fn list_enrollments(&self, course_id: CourseId) -> Result<Vec<Enrollment>> {
        let mut stmt = self.conn.prepare(
            "SELECT student_id, course_id, enrolled_at FROM enrollments WHERE course_id = ?1 ORDER BY student_id",
        )?;
        let enrollments = stmt
            .query_map(params![course_id], |row| {
                let enrolled_at: String = row.get(2)?;
                Ok(Enrollment {
                    student_id: row.get(0)?,
                    course_id: row.get(1)?,
                    enrolled_at: DateTime::parse_from_rfc3339(&enrolled_at)
                        .map(|dt| dt.with_timezone(&Utc))
                        .unwrap_or_default(),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(enrollments)
    }
}
