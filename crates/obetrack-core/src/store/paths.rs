//! Store layout and discovery

use std::path::{Path, PathBuf};

use crate::error::{ObeError, Result};

/// Default store directory name, created under the project root
pub const DEFAULT_STORE_DIR: &str = ".obetrack";

/// Configuration file inside the store directory
pub const CONFIG_FILE: &str = "config.toml";

/// Walk up from `root` looking for a store directory.
///
/// `root` itself may be the store directory.
pub fn discover_store(root: &Path) -> Result<PathBuf> {
    if is_store_dir(root) {
        return Ok(root.to_path_buf());
    }

    let mut current = Some(root);
    while let Some(dir) = current {
        let candidate = dir.join(DEFAULT_STORE_DIR);
        if is_store_dir(&candidate) {
            tracing::debug!(store = %candidate.display(), "discovered store");
            return Ok(candidate);
        }
        current = dir.parent();
    }

    Err(ObeError::StoreNotFound {
        search_root: root.to_path_buf(),
    })
}

fn is_store_dir(path: &Path) -> bool {
    path.is_dir() && path.join(CONFIG_FILE).is_file()
}
