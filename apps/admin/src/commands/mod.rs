//! # Commands Module
//!
//! Every operation the dashboard can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Item listing, search, history, low stock
//! ├── movement.rs  ◄─── Stock entries and exits
//! ├── directory.rs ◄─── Users, suppliers, audit log
//! ├── control.rs   ◄─── Slide-over panel and delete confirmation
//! └── backup.rs    ◄─── Backup export and restore
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only the store
//! async fn list_users(store: &StoreState)
//!
//! // Store and config
//! async fn search_items(store: &StoreState, config: &AdminConfig, query: String)
//!
//! // Panel flows need both the view state and the store
//! async fn save_panel(store: &StoreState, control: &ControlState)
//! ```
//!
//! Commands return owned records so no lock outlives the call.

pub mod backup;
pub mod catalog;
pub mod control;
pub mod directory;
pub mod movement;
