//! Store management for obetrack
//!
//! The store is a directory holding the configuration and the SQLite
//! database. Default location: `.obetrack/` under the project root.

pub mod paths;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::db::Database;
use crate::error::{ObeError, Result};
use crate::model::{Term, TermId};
use crate::scoring::{RecalcEvent, RecalcSummary, ScoreEngine};
pub use paths::{CONFIG_FILE, DEFAULT_STORE_DIR};

/// The obetrack store
#[derive(Debug)]
pub struct Store {
    /// Root path of the store
    root: PathBuf,
    /// Store configuration
    config: StoreConfig,
    /// SQLite database
    db: Database,
}

impl Store {
    /// Discover a store by walking up from the given root directory
    pub fn discover(root: &Path) -> Result<Self> {
        let store_path = paths::discover_store(root)?;
        Self::open(&store_path)
    }

    /// Open an existing store at the given path
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(ObeError::StoreNotFound {
                search_root: path.to_path_buf(),
            });
        }

        let config_path = path.join(CONFIG_FILE);
        let config = if config_path.exists() {
            StoreConfig::load(&config_path)?
        } else {
            StoreConfig::default()
        };

        let db = Database::open(&path.join(&config.database))?;

        Ok(Store {
            root: path.to_path_buf(),
            config,
            db,
        })
    }

    /// Initialize a new store under the given project root
    pub fn init(project_root: &Path) -> Result<Self> {
        Self::init_at(&project_root.join(DEFAULT_STORE_DIR))
    }

    /// Initialize a store at an explicit store path.
    ///
    /// Idempotent: an existing config is kept and the existing database is
    /// opened as is.
    pub fn init_at(store_root: &Path) -> Result<Self> {
        fs::create_dir_all(store_root)?;

        let config_path = store_root.join(CONFIG_FILE);
        let config = if config_path.exists() {
            StoreConfig::load(&config_path)?
        } else {
            let config = StoreConfig::default();
            config.save(&config_path)?;
            tracing::info!(store = %store_root.display(), "initialized store");
            config
        };

        let db = Database::open(&store_root.join(&config.database))?;

        Ok(Store {
            root: store_root.to_path_buf(),
            config,
            db,
        })
    }

    /// Get the store root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Get the database file path
    pub fn db_path(&self) -> PathBuf {
        self.root.join(&self.config.database)
    }

    /// Get the config
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the database
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Resolve the term a command operates on: the explicit one, else the
    /// active term.
    pub fn resolve_term(&self, explicit: Option<TermId>) -> Result<Term> {
        match explicit {
            Some(id) => self.db.get_term(id),
            None => self.db.active_term()?.ok_or_else(|| {
                ObeError::UsageError(
                    "no active term; pass --term or run `obetrack term activate`".to_string(),
                )
            }),
        }
    }

    /// Run the recalculation an event requires, unless automatic
    /// recalculation is turned off in the config.
    pub fn recalculate(&self, event: RecalcEvent) -> Result<Option<RecalcSummary>> {
        if !self.config.auto_recalculate {
            tracing::debug!(?event, "auto_recalculate is off; skipping");
            return Ok(None);
        }
        ScoreEngine::new(&self.db).handle(event).map(Some)
    }
}
