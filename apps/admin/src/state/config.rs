//! # Configuration State
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOCKROOM_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so no lock.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use stockroom_core::{DEFAULT_ACTOR, DEFAULT_SEARCH_LIMIT};

/// Admin application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminConfig {
    /// Name recorded as the actor of audit and history entries.
    pub actor: String,

    /// Directory backup files are written to.
    pub backup_dir: PathBuf,

    /// Optional JSON snapshot used to seed the store instead of demo data.
    pub fixtures_path: Option<PathBuf>,

    /// File name prefix of exported backups.
    pub backup_prefix: String,

    /// Number of suggestions returned by item search.
    pub search_limit: usize,
}

impl Default for AdminConfig {
    fn default() -> Self {
        AdminConfig {
            actor: DEFAULT_ACTOR.to_string(),
            backup_dir: default_backup_dir(),
            fixtures_path: None,
            backup_prefix: "backup-stockroom".to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl AdminConfig {
    /// Loads configuration from environment variables over the defaults.
    ///
    /// ## Environment Variables
    /// - `STOCKROOM_ACTOR`: audit actor name
    /// - `STOCKROOM_BACKUP_DIR`: where backups are written
    /// - `STOCKROOM_FIXTURES`: snapshot file to seed from
    /// - `STOCKROOM_BACKUP_PREFIX`: backup file name prefix
    /// - `STOCKROOM_SEARCH_LIMIT`: positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AdminConfig::default();

        if let Some(actor) = non_blank(lookup("STOCKROOM_ACTOR")) {
            config.actor = actor;
        }

        if let Some(dir) = non_blank(lookup("STOCKROOM_BACKUP_DIR")) {
            config.backup_dir = PathBuf::from(dir);
        }

        config.fixtures_path = non_blank(lookup("STOCKROOM_FIXTURES")).map(PathBuf::from);

        if let Some(prefix) = non_blank(lookup("STOCKROOM_BACKUP_PREFIX")) {
            config.backup_prefix = prefix;
        }

        if let Some(limit) = lookup("STOCKROOM_SEARCH_LIMIT") {
            config.search_limit = limit
                .trim()
                .parse()
                .ok()
                .filter(|n: &usize| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue("STOCKROOM_SEARCH_LIMIT".to_string()))?;
        }

        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Application name used for the platform data directory.
pub const APP_NAME: &str = "stockroom-admin";

/// Platform data directory for backups.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.stockroom.stockroom-admin/backups`
/// - **Windows**: `%APPDATA%\stockroom\stockroom-admin\data\backups`
/// - **Linux**: `~/.local/share/stockroom-admin/backups`
///
/// Falls back to `./backups` when no home directory is known.
pub fn default_backup_dir() -> PathBuf {
    ProjectDirs::from("com", "stockroom", APP_NAME)
        .map(|dirs| dirs.data_dir().join("backups"))
        .unwrap_or_else(|| PathBuf::from("./backups"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
