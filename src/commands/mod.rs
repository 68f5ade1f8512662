//! Command implementations for obetrack

pub mod assessment;
pub mod catalog;
pub mod dispatch;
pub mod enroll;
pub mod grade;
pub mod init;
pub mod mapping;
pub mod output;
pub mod recalc;
pub mod scores;
