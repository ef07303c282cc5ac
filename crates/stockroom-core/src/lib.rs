//! # stockroom-core: State and Consistency Model for the Stock Dashboard
//!
//! This crate holds every collection the dashboard shows and the rules that
//! keep them consistent. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Dashboard (View Layer)                          │   │
//! │  │   Movements ──► Control panel ──► Audit page ──► Backup         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ intents                                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ movement  │  │ directory │  │  backup   │  │   panel   │  │   │
//! │  │   │ entry/exit│  │users/supp.│  │export/rest│  │  drafts   │  │   │
//! │  │   └─────┬─────┘  └─────┬─────┘  └─────┬─────┘  └───────────┘  │   │
//! │  │         └──────────────┼──────────────┘                         │   │
//! │  │                        ▼                                        │   │
//! │  │   ┌───────────────────────────────┐    ┌──────────────────┐    │   │
//! │  │   │   store (EntityStore)         │◄───│ audit (recorder) │    │   │
//! │  │   └───────────────────────────────┘    └──────────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records (User, Supplier, StockItem, HistoryEntry, AuditLog)
//! - [`store`] - The entity store and its read API
//! - [`audit`] - Audit recorder
//! - [`movement`] - Stock entries and exits
//! - [`directory`] - User and supplier maintenance
//! - [`panel`] - Slide-over panel drafts
//! - [`confirm`] - Two-step delete confirmation
//! - [`backup`] - JSON export and restore
//! - [`validation`] - Input rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Funnelled Mutation**: Collections are only written by the components,
//!    and every successful write appends exactly one audit entry
//! 2. **All or Nothing**: Components check first, then mutate
//! 3. **Single Writer**: `&mut EntityStore` is the lock; shared owners wrap
//!    the store in a mutex
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{EntityStore, Snapshot, StockItem};
//! use stockroom_core::movement::EntryRequest;
//!
//! let mut snapshot = Snapshot::default();
//! snapshot.stock_items.push(StockItem {
//!     id: "it-1".to_string(),
//!     code: "AL-001".to_string(),
//!     description: "Aluminium profile".to_string(),
//!     unit: "un".to_string(),
//!     system_stock: 4,
//!     min_stock: 2,
//!     suppliers: vec![],
//! });
//! let mut store = EntityStore::new(snapshot);
//!
//! store
//!     .movements()
//!     .register_entry(&EntryRequest::new("it-1", 10))
//!     .unwrap();
//!
//! assert_eq!(store.find_item("it-1").unwrap().system_stock, 14);
//! assert_eq!(store.audit_logs().len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod audit;
pub mod backup;
pub mod confirm;
pub mod directory;
pub mod error;
pub mod movement;
pub mod panel;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use store::{EntityStore, Snapshot};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Actor name written to audit and history records when none is configured.
pub const DEFAULT_ACTOR: &str = "Administrator";

/// Minimum length of a new password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Number of suggestions the movement form shows for a search.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Longest accepted catalog search query.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Base of the generated avatar reference for new users.
pub const AVATAR_BASE_URL: &str = "https://i.pravatar.cc/150?u=";

/// Largest user, supplier or audit id a snapshot may carry (2^53 - 1, the
/// largest integer a JSON number keeps exactly in the browser).
pub const MAX_RECORD_ID: i64 = (1 << 53) - 1;
