//! # Backup Serializer
//!
//! Export and restore of the complete store as one JSON document.
//!
//! ## Document Shape
//! ```text
//! {
//!   "stockItems":  [StockItem],
//!   "users":       [User],
//!   "suppliers":   [Supplier],
//!   "auditLogs":   [AuditLog],              newest first
//!   "historyData": { itemId: [HistoryEntry] }
//! }
//! ```
//!
//! Restore is all-or-nothing: the document is checked for every key,
//! decoded in full and validated against the store invariants before a
//! single collection is replaced.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{CoreError, CoreResult};
use crate::store::{EntityStore, Snapshot};

/// The backup document is a snapshot of every collection.
pub type BackupDocument = Snapshot;

/// Top-level keys a backup document must carry.
pub const REQUIRED_KEYS: [&str; 5] = [
    "stockItems",
    "users",
    "suppliers",
    "auditLogs",
    "historyData",
];

/// Audit line written after a successful restore.
pub const RESTORE_ACTION: &str = "Restored system from backup.";

// =============================================================================
// Export
// =============================================================================

/// Snapshot of the store as a backup document. Nothing is audited.
pub fn export_all(store: &EntityStore) -> BackupDocument {
    store.snapshot()
}

/// Pretty-printed JSON of [`export_all`].
pub fn export_json(store: &EntityStore) -> CoreResult<String> {
    serde_json::to_string_pretty(&export_all(store))
        .map_err(|e| CoreError::InvalidBackupFormat(e.to_string()))
}

/// File name of a backup written at `at`: `<prefix>-<UTC time>.json`.
///
/// The time uses `-` between hours, minutes and seconds so the name is a
/// valid path on every platform (`:` is rejected on Windows).
pub fn backup_file_name(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}-{}.json", at.format("%Y-%m-%dT%H-%M-%S%.3fZ"))
}

// =============================================================================
// Restore
// =============================================================================

/// Replaces every collection with the contents of `document`.
///
/// On success the audit log is the document's log with one restore entry
/// in front of it.
///
/// ## Errors
/// - `InvalidBackupFormat` - not an object, a key is missing, a
///   collection does not decode, or a record breaks a store invariant
///   (see [`Snapshot::validate`]). The store is left untouched.
pub fn restore_all(store: &mut EntityStore, document: &Value) -> CoreResult<()> {
    let object = document.as_object().ok_or_else(|| {
        CoreError::InvalidBackupFormat("backup document must be a JSON object".to_string())
    })?;

    if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !object.contains_key(**key)) {
        warn!(key = *missing, "backup rejected: missing key");
        return Err(CoreError::InvalidBackupFormat(format!("missing key '{missing}'")));
    }

    let snapshot: Snapshot = serde_json::from_value(document.clone()).map_err(|e| {
        warn!(error = %e, "backup rejected: bad shape");
        CoreError::InvalidBackupFormat(e.to_string())
    })?;
    snapshot.validate().map_err(|e| {
        warn!(error = %e, "backup rejected: invariant broken");
        e
    })?;

    info!(
        items = snapshot.stock_items.len(),
        users = snapshot.users.len(),
        suppliers = snapshot.suppliers.len(),
        "restoring backup"
    );
    store.replace_all(snapshot);
    store.record_as_actor(RESTORE_ACTION);

    Ok(())
}

/// Parses `text` and hands it to [`restore_all`].
pub fn restore_from_str(store: &mut EntityStore, text: &str) -> CoreResult<()> {
    let document: Value = serde_json::from_str(text)
        .map_err(|e| CoreError::InvalidBackupFormat(format!("not valid JSON: {e}")))?;
    restore_all(store, &document)
}

// =============================================================================
// Unit Tests
// =============================================================================
