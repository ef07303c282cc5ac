//! # Stockroom Admin Library
//!
//! Application shell around `stockroom-core`: configuration, logging,
//! shared state and the command layer the dashboard calls.
//!
//! ## Module Organization
//! ```text
//! stockroom_admin/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── store.rs    ◄─── Shared EntityStore behind a mutex
//! │   ├── control.rs  ◄─── Panel and delete confirmation
//! │   └── config.rs   ◄─── AdminConfig from STOCKROOM_* variables
//! ├── commands/       ◄─── One async fn per dashboard operation
//! ├── fixtures.rs     ◄─── Startup snapshot (file or demo data)
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod fixtures;
pub mod state;

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{AdminConfig, StoreState};

/// What the binary should do once the store is seeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print counts, low stock and the latest audit lines.
    Summary,
    /// Write a backup file.
    Export,
    /// Restore from a backup file, then print the summary.
    Restore(PathBuf),
}

/// Runs one admin session.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load Configuration ──► STOCKROOM_* over defaults                   │
/// │  2. Seed Store ──────────► fixture file, else built-in demo data       │
/// │  3. Run Mode ────────────► summary | export | restore <file>           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config: AdminConfig, mode: Mode) -> Result<(), ApiError> {
    info!(actor = %config.actor, ?mode, "Starting Stockroom admin");

    let snapshot = fixtures::initial_snapshot(config.fixtures_path.as_deref()).await?;
    let store = StoreState::seeded(snapshot, config.actor.clone());
    info!("Store seeded");

    match mode {
        Mode::Summary => print_summary(&store).await,
        Mode::Export => {
            let path = commands::backup::export_backup(&store, &config).await?;
            println!("Backup written to {}", path.display());
            Ok(())
        }
        Mode::Restore(path) => {
            commands::backup::restore_backup(&store, &path).await?;
            println!("Restored from {}", path.display());
            print_summary(&store).await
        }
    }
}

async fn print_summary(store: &StoreState) -> Result<(), ApiError> {
    let items = commands::catalog::list_items(store).await?;
    let low = commands::catalog::low_stock_items(store).await?;
    let users = commands::directory::list_users(store).await?;
    let suppliers = commands::directory::list_suppliers(store).await?;
    let audit = commands::directory::audit_log(store).await?;

    println!("Stockroom");
    println!("=========");
    if let Some(admin) = commands::directory::current_admin(store).await? {
        println!("Signed in: {} <{}>", admin.name, admin.email);
    }
    println!("Items:     {}", items.len());
    println!("Users:     {}", users.len());
    println!("Suppliers: {}", suppliers.len());
    println!();

    println!("Low stock ({}):", low.len());
    for item in &low {
        println!(
            "  {:<8} {:<30} {:>6} / min {:<6} {}",
            item.code, item.description, item.system_stock, item.min_stock, item.unit
        );
    }
    println!();

    println!("Latest audit:");
    for log in audit.iter().take(10) {
        println!(
            "  {}  {:<16} {}",
            log.timestamp.format("%Y-%m-%d %H:%M"),
            log.user,
            log.action
        );
    }
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockroom=trace` - Trace for the stockroom crates only
/// - Default: INFO, DEBUG for stockroom
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockroom=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
