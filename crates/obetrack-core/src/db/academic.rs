//! Academic structure: terms, programs, courses, outcomes, students

use crate::error::{ObeError, Result};
use crate::model::{
    Course, CourseId, LearningOutcome, LearningOutcomeId, Program, ProgramId, ProgramOutcome,
    ProgramOutcomeId, Student, StudentId, Term, TermId,
};
use rusqlite::{params, Row};

use super::{not_found_or, unique_or, Database};

fn term_from_row(row: &Row) -> rusqlite::Result<Term> {
    Ok(Term {
        id: row.get(0)?,
        name: row.get(1)?,
        is_active: row.get::<_, i64>(2)? != 0,
    })
}

fn program_from_row(row: &Row) -> rusqlite::Result<Program> {
    Ok(Program {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
    })
}

pub(super) fn course_from_row(row: &Row) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        credits: row.get(3)?,
        program_id: row.get(4)?,
        term_id: row.get(5)?,
    })
}

pub(super) fn learning_outcome_from_row(row: &Row) -> rusqlite::Result<LearningOutcome> {
    Ok(LearningOutcome {
        id: row.get(0)?,
        course_id: row.get(1)?,
        code: row.get(2)?,
        description: row.get(3)?,
    })
}

pub(super) fn program_outcome_from_row(row: &Row) -> rusqlite::Result<ProgramOutcome> {
    Ok(ProgramOutcome {
        id: row.get(0)?,
        program_id: row.get(1)?,
        term_id: row.get(2)?,
        code: row.get(3)?,
        description: row.get(4)?,
    })
}

fn student_from_row(row: &Row) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        username: row.get(1)?,
        full_name: row.get(2)?,
    })
}

pub(super) const COURSE_COLUMNS: &str = "id, code, name, credits, program_id, term_id";
pub(super) const LO_COLUMNS: &str = "id, course_id, code, description";
pub(super) const PO_COLUMNS: &str = "id, program_id, term_id, code, description";

fn require_text(context: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        crate::bail_invalid!(context, "(empty)");
    }
    Ok(())
}

impl Database {
    // ------------------------------------------------------------------
    // Terms
    // ------------------------------------------------------------------

    /// Create a term; an active term deactivates every other term
    pub fn create_term(&self, name: &str, active: bool) -> Result<Term> {
        require_text("term name", name)?;
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| ObeError::transaction("create term", e))?;

        if active {
            tx.execute("UPDATE terms SET is_active = 0", [])?;
        }
        tx.execute(
            "INSERT INTO terms (name, is_active) VALUES (?1, ?2)",
            params![name, active as i64],
        )?;
        let id = TermId::new(tx.last_insert_rowid());
        tx.commit()
            .map_err(|e| ObeError::transaction("create term", e))?;

        tracing::debug!(term_id = %id, active, "created term");
        self.get_term(id)
    }

    /// Mark one term active and every other term inactive
    pub fn set_active_term(&self, id: TermId) -> Result<Term> {
        self.get_term(id)?;
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| ObeError::transaction("activate term", e))?;
        tx.execute("UPDATE terms SET is_active = 0 WHERE id != ?1", params![id])?;
        tx.execute("UPDATE terms SET is_active = 1 WHERE id = ?1", params![id])?;
        tx.commit()
            .map_err(|e| ObeError::transaction("activate term", e))?;

        tracing::info!(term_id = %id, "activated term");
        self.get_term(id)
    }

    pub fn get_term(&self, id: TermId) -> Result<Term> {
        not_found_or(
            self.conn.query_row(
                "SELECT id, name, is_active FROM terms WHERE id = ?1",
                params![id],
                term_from_row,
            ),
            "term",
            id,
        )
    }

    /// The currently active term, if any
    pub fn active_term(&self) -> Result<Option<Term>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, is_active FROM terms WHERE is_active = 1 LIMIT 1")?;
        let mut rows = stmt.query_map([], term_from_row)?;
        rows.next().transpose().map_err(ObeError::from)
    }

    pub fn list_terms(&self) -> Result<Vec<Term>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, is_active FROM terms ORDER BY is_active DESC, name DESC, id",
        )?;
        let terms = stmt
            .query_map([], term_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(terms)
    }

    // ------------------------------------------------------------------
    // Programs
    // ------------------------------------------------------------------

    pub fn create_program(&self, code: &str, name: &str) -> Result<Program> {
        require_text("program code", code)?;
        self.conn
            .execute(
                "INSERT INTO programs (code, name) VALUES (?1, ?2)",
                params![code, name],
            )
            .map_err(|e| unique_or(e, "program", code))?;
        self.get_program(ProgramId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_program(&self, id: ProgramId) -> Result<Program> {
        not_found_or(
            self.conn.query_row(
                "SELECT id, code, name FROM programs WHERE id = ?1",
                params![id],
                program_from_row,
            ),
            "program",
            id,
        )
    }

    pub fn list_programs(&self) -> Result<Vec<Program>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, code, name FROM programs ORDER BY code")?;
        let programs = stmt
            .query_map([], program_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(programs)
    }

    // ------------------------------------------------------------------
    // Courses
    // ------------------------------------------------------------------

    pub fn create_course(
        &self,
        code: &str,
        name: &str,
        credits: u32,
        program_id: ProgramId,
        term_id: TermId,
    ) -> Result<Course> {
        require_text("course code", code)?;
        self.get_program(program_id)?;
        self.get_term(term_id)?;

        self.conn
            .execute(
                "INSERT INTO courses (code, name, credits, program_id, term_id) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![code, name, credits, program_id, term_id],
            )
            .map_err(|e| unique_or(e, "course", code))?;
        self.get_course(CourseId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_course(&self, id: CourseId) -> Result<Course> {
        not_found_or(
            self.conn.query_row(
                &format!("SELECT {} FROM courses WHERE id = ?1", COURSE_COLUMNS),
                params![id],
                course_from_row,
            ),
            "course",
            id,
        )
    }

    /// List courses, optionally narrowed to a program and/or a term
    pub fn list_courses(
        &self,
        program_id: Option<ProgramId>,
        term_id: Option<TermId>,
    ) -> Result<Vec<Course>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM courses
             WHERE (?1 IS NULL OR program_id = ?1) AND (?2 IS NULL OR term_id = ?2)
             ORDER BY code, id",
            COURSE_COLUMNS
        ))?;
        let courses = stmt
            .query_map(params![program_id, term_id], course_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(courses)
    }

    // ------------------------------------------------------------------
    // Learning outcomes
    // ------------------------------------------------------------------

    pub fn create_learning_outcome(
        &self,
        course_id: CourseId,
        code: &str,
        description: &str,
    ) -> Result<LearningOutcome> {
        require_text("learning outcome code", code)?;
        self.get_course(course_id)?;
        self.conn
            .execute(
                "INSERT INTO learning_outcomes (course_id, code, description) VALUES (?1, ?2, ?3)",
                params![course_id, code, description],
            )
            .map_err(|e| unique_or(e, "learning outcome", code))?;
        self.get_learning_outcome(LearningOutcomeId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_learning_outcome(&self, id: LearningOutcomeId) -> Result<LearningOutcome> {
        not_found_or(
            self.conn.query_row(
                &format!("SELECT {} FROM learning_outcomes WHERE id = ?1", LO_COLUMNS),
                params![id],
                learning_outcome_from_row,
            ),
            "learning outcome",
            id,
        )
    }

    pub fn list_learning_outcomes(&self, course_id: CourseId) -> Result<Vec<LearningOutcome>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM learning_outcomes WHERE course_id = ?1 ORDER BY code, id",
            LO_COLUMNS
        ))?;
        let outcomes = stmt
            .query_map(params![course_id], learning_outcome_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(outcomes)
    }

    // ------------------------------------------------------------------
    // Program outcomes
    // ------------------------------------------------------------------

    pub fn create_program_outcome(
        &self,
        program_id: ProgramId,
        term_id: TermId,
        code: &str,
        description: &str,
    ) -> Result<ProgramOutcome> {
        require_text("program outcome code", code)?;
        self.get_program(program_id)?;
        self.get_term(term_id)?;
        self.conn
            .execute(
                "INSERT INTO program_outcomes (program_id, term_id, code, description) VALUES (?1, ?2, ?3, ?4)",
                params![program_id, term_id, code, description],
            )
            .map_err(|e| unique_or(e, "program outcome", code))?;
        self.get_program_outcome(ProgramOutcomeId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_program_outcome(&self, id: ProgramOutcomeId) -> Result<ProgramOutcome> {
        not_found_or(
            self.conn.query_row(
                &format!("SELECT {} FROM program_outcomes WHERE id = ?1", PO_COLUMNS),
                params![id],
                program_outcome_from_row,
            ),
            "program outcome",
            id,
        )
    }

    pub fn list_program_outcomes(
        &self,
        program_id: ProgramId,
        term_id: TermId,
    ) -> Result<Vec<ProgramOutcome>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM program_outcomes WHERE program_id = ?1 AND term_id = ?2 ORDER BY code, id",
            PO_COLUMNS
        ))?;
        let outcomes = stmt
            .query_map(params![program_id, term_id], program_outcome_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(outcomes)
    }

    // ------------------------------------------------------------------
    // Students
    // ------------------------------------------------------------------

    pub fn create_student(&self, username: &str, full_name: Option<&str>) -> Result<Student> {
        require_text("username", username)?;
        self.conn
            .execute(
                "INSERT INTO students (username, full_name) VALUES (?1, ?2)",
                params![username, full_name],
            )
            .map_err(|e| unique_or(e, "student", username))?;
        self.get_student(StudentId::new(self.conn.last_insert_rowid()))
    }

    pub fn get_student(&self, id: StudentId) -> Result<Student> {
        not_found_or(
            self.conn.query_row(
                "SELECT id, username, full_name FROM students WHERE id = ?1",
                params![id],
                student_from_row,
            ),
            "student",
            id,
        )
    }

    pub fn list_students(&self) -> Result<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, full_name FROM students ORDER BY username")?;
        let students = stmt
            .query_map([], student_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(students)
    }
}
