//! `obetrack init` command - create a new store
//!
//! Idempotent: running it again keeps the existing config and data.

use std::path::Path;

use crate::cli::paths::resolve_store_path;
use crate::cli::Cli;
use crate::commands::output::{output_by_format_result, print_json};
use obetrack_core::error::Result;
use obetrack_core::store::Store;

/// Execute the init command
pub fn execute(cli: &Cli, root: &Path) -> Result<()> {
    let store = match cli.store.as_ref() {
        Some(path) => Store::init_at(&resolve_store_path(root, path))?,
        None => Store::init(root)?,
    };

    output_by_format_result!(cli.format,
        json => print_json(&serde_json::json!({
            "status": "ok",
            "store": store.root().display().to_string(),
            "message": "Store initialized"
        })),
        human => {
            if !cli.quiet {
                println!("Initialized obetrack store at {}", store.root().display());
            }
        }
    )
}
