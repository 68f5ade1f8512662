//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Current store format version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Default database filename inside the store directory
pub const DEFAULT_DATABASE_FILE: &str = "obetrack.db";

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Database filename, relative to the store directory
    #[serde(default = "default_database")]
    pub database: String,

    /// Recalculate derived scores after every mutating command (default true).
    /// Turn off for bulk loading, then run `obetrack recalc all`.
    #[serde(default = "default_auto_recalculate")]
    pub auto_recalculate: bool,

    /// Human output settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Configuration for human-readable output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Decimal places shown for scores (default 2)
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            database: default_database(),
            auto_recalculate: default_auto_recalculate(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
        }
    }
}

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

fn default_database() -> String {
    DEFAULT_DATABASE_FILE.to_string()
}

fn default_auto_recalculate() -> bool {
    true
}

fn default_decimals() -> usize {
    2
}
