//! # Backup Commands
//!
//! Export to and restore from backup files on disk.
//!
//! ```text
//! export_backup ──► lock, serialize, unlock ──► mkdir -p backup_dir
//!                                              └─► write <prefix>-<ts>.json
//!
//! restore_backup(path) ──► read file ──► lock ──► validate ──► replace all
//!                                                     │
//!                                                     └─ bad? store untouched
//! ```

use std::path::{Path, PathBuf};

use chrono::Utc;
use stockroom_core::backup::{backup_file_name, export_json, restore_from_str};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{AdminConfig, StoreState};

/// Writes a backup of the whole store and returns the file path.
///
/// Exporting does not change the store and is not audited.
pub async fn export_backup(store: &StoreState, config: &AdminConfig) -> Result<PathBuf, ApiError> {
    debug!(dir = %config.backup_dir.display(), "export_backup command");

    let json = store.with_store(export_json).await?;

    tokio::fs::create_dir_all(&config.backup_dir).await?;
    let path = config
        .backup_dir
        .join(backup_file_name(&config.backup_prefix, Utc::now()));
    tokio::fs::write(&path, json.as_bytes()).await?;

    info!(path = %path.display(), bytes = json.len(), "backup exported");
    Ok(path)
}

/// Replaces the store with the contents of a backup file.
///
/// ## Errors
/// - `IO_ERROR` - the file cannot be read
/// - `INVALID_BACKUP` - bad JSON, a missing collection, a wrong shape or a
///   record breaking a store invariant; the store is left as it was
pub async fn restore_backup(store: &StoreState, path: &Path) -> Result<(), ApiError> {
    debug!(path = %path.display(), "restore_backup command");

    let text = tokio::fs::read_to_string(path).await?;
    store
        .with_store_mut(|s| restore_from_str(s, &text))
        .await
        .inspect_err(|e| warn!(path = %path.display(), error = %e, "restore rejected"))?;

    info!(path = %path.display(), "backup restored");
    Ok(())
}
