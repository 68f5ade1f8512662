use chrono::NaiveDate;

use obetrack_core::format::OutputFormat;
use obetrack_core::model::{validate_weight, AssessmentType};

/// Parse output format from string
pub fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse a mapping or assessment weight in [0, 1]
pub fn parse_weight(s: &str) -> std::result::Result<f64, String> {
    let weight: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    validate_weight("weight", weight).map_err(|e| e.to_string())
}

/// Parse assessment type from string
pub fn parse_assessment_type(s: &str) -> std::result::Result<AssessmentType, String> {
    s.parse::<AssessmentType>().map_err(|e| e.to_string())
}

/// Parse a calendar date (YYYY-MM-DD)
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}': {} (expected YYYY-MM-DD)", s, e))
}
