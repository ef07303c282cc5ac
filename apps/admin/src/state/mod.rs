//! # State Module
//!
//! Application state for the admin shell, split into focused types so each
//! command takes only what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  StoreState  │  │ ControlState │  │   AdminConfig    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<Mutex<  │  │  Arc<Mutex<  │  │  actor           │              │
//! │  │   Entity-    │  │   panel +    │  │  backup_dir      │              │
//! │  │   Store>>    │  │   confirm>>  │  │  search_limit    │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  LOCK ORDER: control before store, never the reverse                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod control;
mod store;

pub use config::{default_backup_dir, AdminConfig, ConfigError};
pub use control::{ControlPanel, ControlState};
pub use store::StoreState;
