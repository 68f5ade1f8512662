//! SQLite database schema for obetrack

use rusqlite::{Connection, OptionalExtension, Result};

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Outcome of schema creation
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaStatus {
    /// Fresh database, tables created
    Created,
    /// Schema already at the current version
    Current,
    /// Database was written by a different schema version
    Unsupported(i32),
}

const SCHEMA_SQL: &str = r#"
-- Academic structure
CREATE TABLE IF NOT EXISTS terms (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS programs (
    id INTEGER PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS courses (
    id INTEGER PRIMARY KEY,
    code TEXT NOT NULL,
    name TEXT NOT NULL,
    credits INTEGER NOT NULL DEFAULT 3,
    program_id INTEGER NOT NULL REFERENCES programs(id) ON DELETE CASCADE,
    term_id INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
    UNIQUE (code, program_id, term_id)
);
CREATE INDEX IF NOT EXISTS idx_courses_scope ON courses(program_id, term_id);

CREATE TABLE IF NOT EXISTS learning_outcomes (
    id INTEGER PRIMARY KEY,
    course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
    code TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    UNIQUE (code, course_id)
);

CREATE TABLE IF NOT EXISTS program_outcomes (
    id INTEGER PRIMARY KEY,
    program_id INTEGER NOT NULL REFERENCES programs(id) ON DELETE CASCADE,
    term_id INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
    code TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    UNIQUE (code, program_id, term_id)
);

CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    full_name TEXT
);

-- Assessments and grades
CREATE TABLE IF NOT EXISTS assessments (
    id INTEGER PRIMARY KEY,
    course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    kind TEXT NOT NULL DEFAULT 'homework',
    total_score INTEGER NOT NULL DEFAULT 100,
    weight REAL NOT NULL,
    date TEXT
);
CREATE INDEX IF NOT EXISTS idx_assessments_course ON assessments(course_id);

CREATE TABLE IF NOT EXISTS enrollments (
    student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
    course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
    enrolled_at TEXT NOT NULL,
    PRIMARY KEY (student_id, course_id)
);
CREATE INDEX IF NOT EXISTS idx_enrollments_course ON enrollments(course_id);

CREATE TABLE IF NOT EXISTS grades (
    student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
    assessment_id INTEGER NOT NULL REFERENCES assessments(id) ON DELETE CASCADE,
    score REAL NOT NULL,
    PRIMARY KEY (student_id, assessment_id)
);
CREATE INDEX IF NOT EXISTS idx_grades_assessment ON grades(assessment_id);

-- Mapping graph
CREATE TABLE IF NOT EXISTS assessment_lo_mappings (
    assessment_id INTEGER NOT NULL REFERENCES assessments(id) ON DELETE CASCADE,
    learning_outcome_id INTEGER NOT NULL REFERENCES learning_outcomes(id) ON DELETE CASCADE,
    weight REAL NOT NULL,
    PRIMARY KEY (assessment_id, learning_outcome_id)
);

CREATE TABLE IF NOT EXISTS lo_po_mappings (
    course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
    learning_outcome_id INTEGER NOT NULL REFERENCES learning_outcomes(id) ON DELETE CASCADE,
    program_outcome_id INTEGER NOT NULL REFERENCES program_outcomes(id) ON DELETE CASCADE,
    weight REAL NOT NULL,
    PRIMARY KEY (course_id, learning_outcome_id, program_outcome_id)
);
CREATE INDEX IF NOT EXISTS idx_lo_po_course ON lo_po_mappings(course_id);

-- Derived scores (replaced wholesale per scope)
CREATE TABLE IF NOT EXISTS student_lo_scores (
    student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
    learning_outcome_id INTEGER NOT NULL REFERENCES learning_outcomes(id) ON DELETE CASCADE,
    score REAL NOT NULL DEFAULT 0.0,
    PRIMARY KEY (student_id, learning_outcome_id)
);
CREATE INDEX IF NOT EXISTS idx_lo_scores_lo ON student_lo_scores(learning_outcome_id);

CREATE TABLE IF NOT EXISTS student_po_scores (
    student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
    program_outcome_id INTEGER NOT NULL REFERENCES program_outcomes(id) ON DELETE CASCADE,
    term_id INTEGER NOT NULL REFERENCES terms(id) ON DELETE CASCADE,
    score REAL NOT NULL DEFAULT 0.0,
    PRIMARY KEY (student_id, program_outcome_id, term_id)
);

-- Store metadata
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

/// Table names in creation order, for diagnostics and tests
pub const TABLES: [&str; 14] = [
    "terms",
    "programs",
    "courses",
    "learning_outcomes",
    "program_outcomes",
    "students",
    "assessments",
    "enrollments",
    "grades",
    "assessment_lo_mappings",
    "lo_po_mappings",
    "student_lo_scores",
    "student_po_scores",
    "meta",
];

pub fn create_schema(conn: &Connection) -> Result<SchemaStatus> {
    let has_meta: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'meta'",
            [],
            |r| r.get::<_, i64>(0),
        )
        .map(|n| n > 0)?;

    let current_version: Option<i32> = if has_meta {
        conn.query_row(
            "SELECT value FROM meta WHERE key = 'schema_version'",
            [],
            |r| r.get::<_, String>(0).map(|s| s.parse().unwrap_or(0)),
        )
        .optional()?
    } else {
        None
    };

    let status = match current_version {
        None => {
            conn.execute_batch(SCHEMA_SQL)?;
            conn.execute(
                "INSERT OR REPLACE INTO meta (key, value) VALUES ('schema_version', ?1)",
                [&CURRENT_SCHEMA_VERSION.to_string()],
            )?;
            SchemaStatus::Created
        }
        Some(v) if v == CURRENT_SCHEMA_VERSION => SchemaStatus::Current,
        Some(v) => SchemaStatus::Unsupported(v),
    };

    Ok(status)
}
