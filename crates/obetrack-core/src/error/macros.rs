//! Error macros for obetrack

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::ObeError::invalid_value($context, $value))
    };
}

/// Macro for rejecting a write that would break a model invariant
#[macro_export]
macro_rules! bail_constraint {
    ($($arg:tt)*) => {
        return Err($crate::error::ObeError::ConstraintViolation(format!($($arg)*)))
    };
}

/// Macro for mapping database errors
#[macro_export]
macro_rules! map_db_err {
    ($op:expr, $error:expr) => {
        $crate::error::ObeError::db_operation($op, $error)
    };
}
