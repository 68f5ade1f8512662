//! SQLite database module for obetrack
//!
//! Holds the source facts written by the collaborator layer (academic
//! structure, assessments, grades, enrollments, mapping graph) and the two
//! derived score tables the scoring engine owns.

mod academic;
mod assessments;
mod enrollments;
mod mappings;
mod outcome_store;
mod schema;
mod scores;

use crate::error::{ObeError, Result};
use rusqlite::Connection;
use std::path::Path;

pub use assessments::NewAssessment;
pub use enrollments::BulkEnrollment;
pub use schema::{create_schema, SchemaStatus, CURRENT_SCHEMA_VERSION, TABLES};
pub use scores::{LoScoreView, PoScoreView};

/// SQLite database for obetrack
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database file at `db_path`
    #[tracing::instrument(skip(db_path), fields(db_path = %db_path.display()))]
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(|e| {
            ObeError::Other(format!(
                "failed to open database at {}: {}",
                db_path.display(),
                e
            ))
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| ObeError::Other(format!("failed to enable WAL mode: {}", e)))?;

        Self::from_connection(conn)
    }

    /// Open a private in-memory database (tests, dry runs)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ObeError::Other(format!("failed to open in-memory database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| ObeError::Other(format!("failed to enable foreign keys: {}", e)))?;

        match create_schema(&conn)
            .map_err(|e| ObeError::Other(format!("failed to create database schema: {}", e)))?
        {
            SchemaStatus::Created => tracing::info!(
                version = CURRENT_SCHEMA_VERSION,
                "Created database schema"
            ),
            SchemaStatus::Current => {}
            SchemaStatus::Unsupported(found) => {
                return Err(ObeError::FailedOperation {
                    operation: "open database".to_string(),
                    reason: format!(
                        "schema version {} is not supported (expected {})",
                        found, CURRENT_SCHEMA_VERSION
                    ),
                });
            }
        }

        Ok(Database { conn })
    }

    pub fn get_schema_version(&self) -> Result<i32> {
        self.conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'schema_version'",
                [],
                |r| {
                    let s: String = r.get(0)?;
                    Ok(s.parse().unwrap_or(0))
                },
            )
            .map_err(|e| ObeError::Other(format!("failed to get schema version: {}", e)))
    }

    /// Row count of a schema table
    pub fn count_rows(&self, table: &str) -> Result<i64> {
        if !TABLES.contains(&table) {
            crate::bail_invalid!("table", table);
        }
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
            .map_err(|e| ObeError::Other(format!("failed to count {}: {}", table, e)))
    }
}

/// Map "no rows" onto a typed NotFound for the given entity
pub(crate) fn not_found_or<T>(
    result: rusqlite::Result<T>,
    entity: &'static str,
    id: impl std::fmt::Display,
) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(ObeError::not_found(entity, id)),
        Err(e) => Err(crate::map_db_err!(&format!("load {} {}", entity, id), e)),
    }
}

/// Translate UNIQUE violations into AlreadyExists; pass other errors through
pub(crate) fn unique_or(
    error: rusqlite::Error,
    context: &str,
    value: impl std::fmt::Display,
) -> ObeError {
    match &error {
        rusqlite::Error::SqliteFailure(code, _)
            if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            ObeError::already_exists(context, value)
        }
        _ => crate::map_db_err!(&format!("insert {}", context), error),
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Flush WAL so short-lived CLI invocations leave a self-contained file
        let _ = self.conn.pragma_update(None, "wal_checkpoint", "TRUNCATE");
    }
}

#[cfg(test)]
pub(crate) mod tests;
