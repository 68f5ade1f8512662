//! Output formats and score rendering

use std::fmt;
use std::str::FromStr;

use crate::error::ObeError;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text for terminals
    #[default]
    Human,
    /// One JSON document on stdout
    Json,
}

impl FromStr for OutputFormat {
    type Err = ObeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(ObeError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a score with a fixed number of decimals
pub fn format_score(score: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, score)
}
