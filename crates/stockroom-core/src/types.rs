//! # Domain Types
//!
//! Plain value records held by the [`EntityStore`](crate::store::EntityStore).
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    Supplier     │   │   StockItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (String)    │       │
//! │  │  email (unique) │   │  name, contact  │   │  code           │       │
//! │  │  profile        │   │  email, phone   │   │  system_stock≥0 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────────────────┐   ┌─────────────────────────────┐     │
//! │  │  HistoryEntry (per item)    │   │  AuditLog (global)          │     │
//! │  │  ─────────────────────────  │   │  ─────────────────────────  │     │
//! │  │  Entry { details }          │   │  id, timestamp              │     │
//! │  │  Exit  { requester, resp. } │   │  user, action               │     │
//! │  └─────────────────────────────┘   └─────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No record holds a reference to another; relations are by id lookup.
//! Field names serialize in camelCase, which is also the backup format.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Users
// =============================================================================

/// Access profile of a dashboard user.
///
/// Only a flag: nothing in the core enforces permissions by profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Profile {
    Administrator,
    Operator,
}

impl Default for Profile {
    fn default() -> Self {
        Profile::Operator
    }
}

/// A dashboard user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Unique across users, compared case-insensitively.
    pub email: String,
    pub profile: Profile,
    /// Avatar reference; replaced through `update_user`.
    pub avatar_url: String,
}

impl User {
    /// Checks whether this user's email equals `email`, ignoring case and
    /// surrounding whitespace on both sides.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().to_lowercase() == email.trim().to_lowercase()
    }
}

/// Fields supplied when creating a user (id and avatar are generated).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub profile: Profile,
}

// =============================================================================
// Suppliers
// =============================================================================

/// A supplier of stock items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Fields supplied when creating a supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
}

// =============================================================================
// Stock Items
// =============================================================================

/// An item of the stock catalog.
///
/// ## Invariants
/// - `system_stock` is never negative
/// - `system_stock` changes only through the movement processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: String,

    /// Business code shown in lists and audit lines (e.g., "AL-001").
    pub code: String,

    pub description: String,

    /// Unit of measure ("un", "kg", "m", ...).
    pub unit: String,

    /// Quantity currently on hand according to the system.
    pub system_stock: i64,

    /// Threshold at or below which the item counts as low stock.
    pub min_stock: i64,

    /// Supplier names for this item, preferred supplier first.
    #[serde(default, alias = "supplier", deserialize_with = "one_or_many")]
    #[ts(type = "string[]")]
    pub suppliers: Vec<String>,
}

impl StockItem {
    /// Case-insensitive substring match against code or description.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.code.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }

    /// Checks if the item is at or below its minimum stock.
    #[inline]
    pub fn is_below_minimum(&self) -> bool {
        self.system_stock <= self.min_stock
    }
}

/// Accepts `"ACME"` as well as `["ACME", "Globex"]`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) if s.is_empty() => Vec::new(),
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

// =============================================================================
// History
// =============================================================================

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MovementKind {
    Entry,
    Exit,
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementKind::Entry => f.write_str("entry"),
            MovementKind::Exit => f.write_str("exit"),
        }
    }
}

/// One movement in an item's history. Immutable once created.
///
/// Serialized with a `type` tag: `{"type": "Entry", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type")]
pub enum HistoryEntry {
    /// Inbound movement.
    Entry {
        id: String,
        #[ts(as = "String")]
        date: NaiveDate,
        quantity: i64,
        user: String,
        /// Supplier, invoice and notes as one line of text.
        details: String,
    },
    /// Outbound movement.
    Exit {
        id: String,
        #[ts(as = "String")]
        date: NaiveDate,
        quantity: i64,
        user: String,
        requester: String,
        responsible: String,
    },
}

impl HistoryEntry {
    pub fn id(&self) -> &str {
        match self {
            HistoryEntry::Entry { id, .. } | HistoryEntry::Exit { id, .. } => id,
        }
    }

    pub fn quantity(&self) -> i64 {
        match self {
            HistoryEntry::Entry { quantity, .. } | HistoryEntry::Exit { quantity, .. } => {
                *quantity
            }
        }
    }

    pub fn kind(&self) -> MovementKind {
        match self {
            HistoryEntry::Entry { .. } => MovementKind::Entry,
            HistoryEntry::Exit { .. } => MovementKind::Exit,
        }
    }
}

// =============================================================================
// Audit Log
// =============================================================================

/// A human-readable record of one store mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuditLog {
    pub id: i64,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    /// Actor name.
    pub user: String,
    pub action: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
