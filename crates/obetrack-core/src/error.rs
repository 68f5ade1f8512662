//! Error types and exit codes for obetrack
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, out-of-range values)
//! - 3: Data/store error (missing entity, violated constraint, missing store)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the obetrack binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error - missing entity, constraint violation (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during obetrack operations
#[derive(Error, Debug)]
pub enum ObeError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/store errors (exit code 3)
    #[error("store not found (searched from {search_root:?})")]
    StoreNotFound { search_root: PathBuf },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{context} already exists: {value}")]
    AlreadyExists { context: String, value: String },

    #[error("constraint violated: {0}")]
    ConstraintViolation(String),

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl ObeError {
    /// Create an error for a failed database operation
    pub fn db_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        ObeError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed transaction operation
    pub fn transaction(operation: &str, error: impl std::fmt::Display) -> Self {
        ObeError::FailedOperation {
            operation: format!("{} transaction", operation),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        ObeError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that already exists
    pub fn already_exists(context: &str, value: impl std::fmt::Display) -> Self {
        ObeError::AlreadyExists {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        ObeError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether this error reports a missing entity
    pub fn is_not_found(&self) -> bool {
        matches!(self, ObeError::NotFound { .. })
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ObeError::UnknownFormat(_)
            | ObeError::UsageError(_)
            | ObeError::InvalidValue { .. } => ExitCode::Usage,

            ObeError::StoreNotFound { .. }
            | ObeError::NotFound { .. }
            | ObeError::AlreadyExists { .. }
            | ObeError::ConstraintViolation(_) => ExitCode::Data,

            ObeError::Io(_)
            | ObeError::Json(_)
            | ObeError::Toml(_)
            | ObeError::Sqlite(_)
            | ObeError::FailedOperation { .. }
            | ObeError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            ObeError::UnknownFormat(_) => "unknown_format",
            ObeError::UsageError(_) => "usage_error",
            ObeError::InvalidValue { .. } => "invalid_value",
            ObeError::StoreNotFound { .. } => "store_not_found",
            ObeError::NotFound { .. } => "not_found",
            ObeError::AlreadyExists { .. } => "already_exists",
            ObeError::ConstraintViolation(_) => "constraint_violation",
            ObeError::Io(_) => "io_error",
            ObeError::Json(_) => "json_error",
            ObeError::Toml(_) => "toml_error",
            ObeError::Sqlite(_) => "database_error",
            ObeError::FailedOperation { .. } => "failed_operation",
            ObeError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        if let ObeError::NotFound { entity, id } = self {
            error_obj["entity"] = serde_json::json!(entity);
            error_obj["id"] = serde_json::json!(id);
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for obetrack operations
pub type Result<T> = std::result::Result<T, ObeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_data_error() {
        let err = ObeError::not_found("course", 42);
        assert_eq!(err.exit_code(), ExitCode::Data);
        assert_eq!(err.to_string(), "course not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_value_is_usage_error() {
        let err = ObeError::invalid_value("weight", 1.5);
        assert_eq!(err.exit_code(), ExitCode::Usage);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_to_json_includes_entity_for_not_found() {
        let json = ObeError::not_found("student", 7).to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "not_found");
        assert_eq!(json["error"]["entity"], "student");
        assert_eq!(json["error"]["id"], "7");
    }

    #[test]
    fn test_constraint_macro_formats_message() {
        fn check(score: f64) -> Result<()> {
            if score > 100.0 {
                crate::bail_constraint!("score {} exceeds total {}", score, 100);
            }
            Ok(())
        }

        let err = check(120.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "constraint violated: score 120 exceeds total 100"
        );
        assert_eq!(err.exit_code(), ExitCode::Data);
    }
}
