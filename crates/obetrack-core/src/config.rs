//! Store configuration for obetrack
//!
//! Configuration is stored in `.obetrack/config.toml`.

pub mod types;

use std::fs;
use std::path::Path;

use crate::error::{ObeError, Result};

pub use types::{DisplayConfig, StoreConfig, DEFAULT_DATABASE_FILE, STORE_FORMAT_VERSION};

impl StoreConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: StoreConfig = toml::from_str(&content)?;

        if config.version > STORE_FORMAT_VERSION {
            return Err(ObeError::invalid_value(
                "store format version",
                format!("{} (this build supports {})", config.version, STORE_FORMAT_VERSION),
            ));
        }
        if config.database.trim().is_empty() {
            crate::bail_invalid!("database filename", "(empty)");
        }

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ObeError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.version, STORE_FORMAT_VERSION);
        assert_eq!(config.database, DEFAULT_DATABASE_FILE);
        assert!(config.auto_recalculate);
        assert_eq!(config.display.decimals, 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = StoreConfig {
            auto_recalculate: false,
            display: DisplayConfig { decimals: 4 },
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = StoreConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "auto_recalculate = false\n").unwrap();

        let loaded = StoreConfig::load(&path).unwrap();
        assert!(!loaded.auto_recalculate);
        assert_eq!(loaded.database, DEFAULT_DATABASE_FILE);
        assert_eq!(loaded.display.decimals, 2);
    }

    #[test]
    fn test_newer_format_version_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "version = 99\n").unwrap();

        let err = StoreConfig::load(&path).unwrap_err();
        assert!(matches!(err, ObeError::InvalidValue { .. }));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "auto_recalculate = [").unwrap();

        assert!(matches!(
            StoreConfig::load(&path).unwrap_err(),
            ObeError::Toml(_)
        ));
    }
}
