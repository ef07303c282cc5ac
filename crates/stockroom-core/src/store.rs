//! # Entity Store
//!
//! The single source of truth for every collection the dashboard renders.
//!
//! ## Access Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        EntityStore                                      │
//! │                                                                         │
//! │  READ (pub)                         WRITE (components only)             │
//! │  ─────────────────────────          ─────────────────────────────       │
//! │  stock_items() / find_item()        store.movements()  → entry/exit    │
//! │  users() / find_user()              store.directory()  → users/supp.   │
//! │  suppliers() / find_supplier()      backup::restore_all → replace all  │
//! │  audit_logs() / history()                     │                         │
//! │  search_items() / snapshot()                  ▼                         │
//! │                                      audit::record (one per success)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fields are `pub(crate)`: nothing outside this crate can change a
//! collection without going through a component, so the audit trail cannot
//! be bypassed.

use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::directory::DirectoryManager;
use crate::error::{CoreError, CoreResult};
use crate::movement::MovementProcessor;
use crate::types::{AuditLog, HistoryEntry, Profile, StockItem, Supplier, User};
use crate::validation::validate_search_query;
use crate::{DEFAULT_ACTOR, MAX_RECORD_ID};

// =============================================================================
// Snapshot
// =============================================================================

/// All five collections at one point in time.
///
/// This is both the startup fixture shape and the backup document: its JSON
/// form has exactly the keys `stockItems`, `users`, `suppliers`,
/// `auditLogs` and `historyData`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub stock_items: Vec<StockItem>,
    pub users: Vec<User>,
    pub suppliers: Vec<Supplier>,
    /// Newest first.
    pub audit_logs: Vec<AuditLog>,
    /// Item id → movements, newest first.
    pub history_data: BTreeMap<String, Vec<HistoryEntry>>,
}

impl Snapshot {
    /// Checks the store invariants a decoded document cannot express in its
    /// types.
    ///
    /// ## Rules
    /// - `systemStock` and `minStock` are not negative
    /// - user ids are unique, supplier ids are unique
    /// - user, supplier and audit ids are at most [`MAX_RECORD_ID`]
    ///
    /// ## Errors
    /// `InvalidBackupFormat` naming the first offending record.
    pub fn validate(&self) -> CoreResult<()> {
        for item in &self.stock_items {
            if item.system_stock < 0 || item.min_stock < 0 {
                return Err(CoreError::InvalidBackupFormat(format!(
                    "item {} has negative stock",
                    item.code
                )));
            }
        }

        check_ids("user", self.users.iter().map(|u| u.id), true)?;
        check_ids("supplier", self.suppliers.iter().map(|s| s.id), true)?;
        check_ids("audit log", self.audit_logs.iter().map(|l| l.id), false)?;

        Ok(())
    }
}

fn check_ids(kind: &str, ids: impl Iterator<Item = i64>, unique: bool) -> CoreResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id > MAX_RECORD_ID {
            return Err(CoreError::InvalidBackupFormat(format!(
                "{kind} id {id} is out of range"
            )));
        }
        if unique && !seen.insert(id) {
            return Err(CoreError::InvalidBackupFormat(format!(
                "duplicate {kind} id {id}"
            )));
        }
    }
    Ok(())
}

// =============================================================================
// Id Generator
// =============================================================================

/// Numeric ids for users, suppliers and audit logs.
///
/// Ids follow the wall clock in milliseconds but are strictly increasing, so
/// two records created within the same millisecond still get distinct ids.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Starts above every id already present in `snapshot`.
    fn seeded(snapshot: &Snapshot) -> Self {
        let last = snapshot
            .users
            .iter()
            .map(|u| u.id)
            .chain(snapshot.suppliers.iter().map(|s| s.id))
            .chain(snapshot.audit_logs.iter().map(|l| l.id))
            .max()
            .unwrap_or(0);
        IdGenerator { last }
    }

    pub(crate) fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let id = now.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

// =============================================================================
// Entity Store
// =============================================================================

/// In-memory collections of users, suppliers, stock items, audit logs and
/// per-item history.
#[derive(Debug, Clone)]
pub struct EntityStore {
    pub(crate) stock_items: Vec<StockItem>,
    pub(crate) users: Vec<User>,
    pub(crate) suppliers: Vec<Supplier>,
    pub(crate) audit_logs: Vec<AuditLog>,
    pub(crate) history: BTreeMap<String, Vec<HistoryEntry>>,
    /// Name written as the actor of audit and history records.
    pub(crate) actor: String,
    pub(crate) ids: IdGenerator,
}

impl EntityStore {
    /// Creates a store seeded from an initial snapshot.
    pub fn new(snapshot: Snapshot) -> Self {
        let ids = IdGenerator::seeded(&snapshot);
        EntityStore {
            stock_items: snapshot.stock_items,
            users: snapshot.users,
            suppliers: snapshot.suppliers,
            audit_logs: snapshot.audit_logs,
            history: snapshot.history_data,
            actor: DEFAULT_ACTOR.to_string(),
            ids,
        }
    }

    /// Sets the actor name recorded on audit and history entries.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    // -------------------------------------------------------------------------
    // Components
    // -------------------------------------------------------------------------

    /// Stock entry/exit operations.
    ///
    /// ```rust,ignore
    /// store.movements().register_exit(&request)?;
    /// ```
    pub fn movements(&mut self) -> MovementProcessor<'_> {
        MovementProcessor::new(self)
    }

    /// User and supplier maintenance.
    pub fn directory(&mut self) -> DirectoryManager<'_> {
        DirectoryManager::new(self)
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn stock_items(&self) -> &[StockItem] {
        &self.stock_items
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    /// Audit log, newest first.
    pub fn audit_logs(&self) -> &[AuditLog] {
        &self.audit_logs
    }

    /// Movements of one item, newest first. Empty if it never moved.
    pub fn history(&self, item_id: &str) -> &[HistoryEntry] {
        self.history
            .get(item_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn history_data(&self) -> &BTreeMap<String, Vec<HistoryEntry>> {
        &self.history
    }

    pub fn find_item(&self, id: &str) -> Option<&StockItem> {
        self.stock_items.iter().find(|i| i.id == id)
    }

    pub fn find_user(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_supplier(&self, id: i64) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    /// Searches the catalog by code or description.
    ///
    /// ## Matching
    /// ```text
    /// query "perf"  ──►  lowercase  ──►  substring of code OR description
    ///                                          │
    ///                                          ▼
    ///                                 first `limit` items in catalog order
    /// ```
    /// A blank query returns nothing.
    pub fn search_items(&self, query: &str, limit: usize) -> CoreResult<Vec<&StockItem>> {
        let query = validate_search_query(query)?;
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();
        Ok(self
            .stock_items
            .iter()
            .filter(|item| item.matches(&needle))
            .take(limit)
            .collect())
    }

    /// Items at or below their minimum stock (header badge).
    pub fn items_below_minimum(&self) -> Vec<&StockItem> {
        self.stock_items
            .iter()
            .filter(|item| item.is_below_minimum())
            .collect()
    }

    /// The first administrator, shown as the signed-in user.
    pub fn current_admin(&self) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.profile == Profile::Administrator)
    }

    /// Preferred supplier of an item, pre-selected in the entry form.
    pub fn default_supplier(&self, item_id: &str) -> Option<&str> {
        self.find_item(item_id)
            .and_then(|item| item.suppliers.first())
            .map(String::as_str)
    }

    /// Clones all five collections.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stock_items: self.stock_items.clone(),
            users: self.users.clone(),
            suppliers: self.suppliers.clone(),
            audit_logs: self.audit_logs.clone(),
            history_data: self.history.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Crate-internal mutation
    // -------------------------------------------------------------------------

    /// Swaps in all five collections at once. Used only by restore, after
    /// [`Snapshot::validate`].
    pub(crate) fn replace_all(&mut self, snapshot: Snapshot) {
        let seeded = IdGenerator::seeded(&snapshot);
        self.stock_items = snapshot.stock_items;
        self.users = snapshot.users;
        self.suppliers = snapshot.suppliers;
        self.audit_logs = snapshot.audit_logs;
        self.history = snapshot.history_data;
        if seeded.last > self.ids.last {
            self.ids = seeded;
        }
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        EntityStore::new(Snapshot::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Small catalog shared by the component tests.
    pub(crate) fn fixture() -> Snapshot {
        let item = |id: &str, code: &str, desc: &str, stock: i64, min: i64, sup: &[&str]| {
            StockItem {
                id: id.to_string(),
                code: code.to_string(),
                description: desc.to_string(),
                unit: "un".to_string(),
                system_stock: stock,
                min_stock: min,
                suppliers: sup.iter().map(|s| s.to_string()).collect(),
            }
        };

        Snapshot {
            stock_items: vec![
                item("it-1", "AL-001", "Aluminium profile 6m", 40, 10, &["Alcoa", "Hydro"]),
                item("it-2", "VD-010", "Tempered glass 8mm", 3, 5, &[]),
                item("it-3", "PF-200", "Stainless screw 4x40", 500, 100, &["Fixa"]),
            ],
            users: vec![
                User {
                    id: 1,
                    name: "Operator One".to_string(),
                    email: "op@stockroom.test".to_string(),
                    profile: Profile::Operator,
                    avatar_url: String::new(),
                },
                User {
                    id: 2,
                    name: "Admin".to_string(),
                    email: "Admin@Stockroom.test".to_string(),
                    profile: Profile::Administrator,
                    avatar_url: String::new(),
                },
            ],
            suppliers: vec![Supplier {
                id: 10,
                name: "Alcoa".to_string(),
                contact: "Marta".to_string(),
                email: "sales@alcoa.test".to_string(),
                phone: "555-0100".to_string(),
            }],
            audit_logs: Vec::new(),
            history_data: BTreeMap::new(),
        }
    }

    #[test]
    fn test_read_access() {
        let store = EntityStore::new(fixture());
        assert_eq!(store.stock_items().len(), 3);
        assert_eq!(store.find_item("it-2").unwrap().code, "VD-010");
        assert!(store.find_item("missing").is_none());
        assert_eq!(store.find_user(2).unwrap().name, "Admin");
        assert_eq!(store.find_supplier(10).unwrap().name, "Alcoa");
        assert!(store.history("it-1").is_empty());
    }

    #[test]
    fn test_search_matches_code_or_description() {
        let store = EntityStore::new(fixture());

        let by_code = store.search_items("vd-0", 5).unwrap();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].id, "it-2");

        let by_description = store.search_items("GLASS", 5).unwrap();
        assert_eq!(by_description[0].id, "it-2");

        assert!(store.search_items("   ", 5).unwrap().is_empty());
    }

    #[test]
    fn test_search_respects_limit() {
        let store = EntityStore::new(fixture());
        // every code contains a '0'
        assert_eq!(store.search_items("0", 2).unwrap().len(), 2);
    }

    #[test]
    fn test_items_below_minimum() {
        let store = EntityStore::new(fixture());
        let low: Vec<_> = store.items_below_minimum().iter().map(|i| i.id.clone()).collect();
        assert_eq!(low, vec!["it-2".to_string()]);
    }

    #[test]
    fn test_current_admin_and_default_supplier() {
        let store = EntityStore::new(fixture());
        assert_eq!(store.current_admin().unwrap().id, 2);
        assert_eq!(store.default_supplier("it-1"), Some("Alcoa"));
        assert_eq!(store.default_supplier("it-2"), None);
    }

    #[test]
    fn test_ids_are_strictly_increasing() {
        let mut store = EntityStore::new(fixture());
        let a = store.ids.next_id();
        let b = store.ids.next_id();
        assert!(b > a);
        assert!(a > 10);
    }

    #[test]
    fn test_next_id_at_the_top_does_not_panic() {
        let mut ids = IdGenerator { last: i64::MAX };
        assert_eq!(ids.next_id(), i64::MAX);
    }

    #[test]
    fn test_validate_accepts_fixture() {
        assert!(fixture().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_broken_invariants() {
        let mut negative = fixture();
        negative.stock_items[0].system_stock = -5;
        assert!(matches!(
            negative.validate(),
            Err(CoreError::InvalidBackupFormat(ref m)) if m.contains("AL-001")
        ));

        let mut low_min = fixture();
        low_min.stock_items[1].min_stock = -1;
        assert!(low_min.validate().is_err());

        let mut twin_suppliers = fixture();
        let twin = twin_suppliers.suppliers[0].clone();
        twin_suppliers.suppliers.push(twin);
        assert!(matches!(
            twin_suppliers.validate(),
            Err(CoreError::InvalidBackupFormat(ref m)) if m.contains("duplicate supplier id 10")
        ));

        let mut twin_users = fixture();
        twin_users.users[1].id = 1;
        assert!(twin_users.validate().is_err());

        let mut huge = fixture();
        huge.suppliers[0].id = i64::MAX;
        assert!(matches!(
            huge.validate(),
            Err(CoreError::InvalidBackupFormat(ref m)) if m.contains("out of range")
        ));
    }

    #[test]
    fn test_snapshot_matches_seed() {
        let seed = fixture();
        let store = EntityStore::new(seed.clone());
        assert_eq!(store.snapshot(), seed);
    }
}
