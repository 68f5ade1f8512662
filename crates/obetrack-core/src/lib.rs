//! Obetrack Core Library
//!
//! Core domain logic for outcome-based education tracking: the academic model,
//! the SQLite store, and the engine that aggregates assessment grades into
//! learning outcome and program outcome scores.

pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod scoring;
pub mod store;
