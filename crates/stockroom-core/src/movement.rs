//! # Movement Processor
//!
//! Validates and applies stock entries and exits.
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   register_entry / register_exit                        │
//! │                                                                         │
//! │  1. CHECK (no writes)                                                  │
//! │     ├── quantity > 0 ?              else InvalidQuantity               │
//! │     ├── item id resolves ?          else ItemNotFound                  │
//! │     └── exit: qty ≤ system_stock ?  else InsufficientStock             │
//! │                                                                         │
//! │  2. APPLY (cannot fail)                                                │
//! │     stock mutation ──► history prepend ──► audit prepend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The processor holds `&mut EntityStore` for the whole call, so nothing can
//! touch the item between the stock check and the decrement.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::store::EntityStore;
use crate::types::HistoryEntry;
use crate::validation::validate_quantity;

// =============================================================================
// Requests
// =============================================================================

/// Parameters of a stock entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EntryRequest {
    pub item_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub supplier: String,
    /// Invoice (NF) reference.
    #[serde(default)]
    pub invoice_ref: String,
    #[serde(default)]
    pub notes: String,
}

impl EntryRequest {
    /// Entry with no supplier, invoice or notes.
    pub fn new(item_id: impl Into<String>, quantity: i64) -> Self {
        EntryRequest {
            item_id: item_id.into(),
            quantity,
            ..Default::default()
        }
    }

    /// Free-text details stored on the history record.
    fn details(&self) -> String {
        format!(
            "Supplier: {}. Invoice: {}. Notes: {}",
            or_na(&self.supplier),
            or_na(&self.invoice_ref),
            or_na(&self.notes)
        )
    }
}

/// Parameters of a stock exit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExitRequest {
    pub item_id: String,
    pub quantity: i64,
    /// Who asked for the material.
    #[serde(default)]
    pub requester: String,
    /// Who handed it out.
    #[serde(default)]
    pub responsible: String,
}

fn or_na(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

fn new_history_id() -> String {
    format!("h-{}", Uuid::new_v4())
}

// =============================================================================
// Processor
// =============================================================================

/// Applies movements to one store. Obtain with [`EntityStore::movements`].
#[derive(Debug)]
pub struct MovementProcessor<'a> {
    store: &'a mut EntityStore,
}

impl<'a> MovementProcessor<'a> {
    pub(crate) fn new(store: &'a mut EntityStore) -> Self {
        MovementProcessor { store }
    }

    /// Registers an inbound movement.
    ///
    /// ## Returns
    /// The Entry history record, now first in the item's history.
    ///
    /// ## Errors
    /// - `InvalidQuantity` - quantity ≤ 0, or the new stock would overflow
    /// - `ItemNotFound` - item id does not resolve
    pub fn register_entry(&mut self, request: &EntryRequest) -> CoreResult<HistoryEntry> {
        debug!(item_id = %request.item_id, quantity = request.quantity, "register_entry");
        validate_quantity(request.quantity)?;

        let item = self
            .store
            .stock_items
            .iter_mut()
            .find(|i| i.id == request.item_id)
            .ok_or_else(|| CoreError::ItemNotFound(request.item_id.clone()))?;

        let new_stock = item.system_stock.checked_add(request.quantity).ok_or_else(|| {
            CoreError::InvalidQuantity(format!(
                "stock of {} would overflow",
                item.code
            ))
        })?;

        // Everything checked: apply.
        item.system_stock = new_stock;
        let code = item.code.clone();

        let entry = HistoryEntry::Entry {
            id: new_history_id(),
            date: Utc::now().date_naive(),
            quantity: request.quantity,
            user: self.store.actor.clone(),
            details: request.details(),
        };
        self.prepend_history(&request.item_id, entry.clone());

        self.store.record_as_actor(format!(
            "Registered entry of {} unit(s) of item {}. Invoice: {}.",
            request.quantity,
            code,
            or_na(&request.invoice_ref)
        ));

        Ok(entry)
    }

    /// Registers an outbound movement.
    ///
    /// ## User Workflow
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  Exit form: item AL-001 (stock 3), quantity 5                      │
    /// │       │                                                             │
    /// │       ▼                                                             │
    /// │  register_exit ── 5 > 3 ──► Err(InsufficientStock)                 │
    /// │       │                     stock, history, audit untouched        │
    /// │       │                                                             │
    /// │  quantity 2 ──► stock 1, Exit record, audit line                   │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Errors
    /// - `InvalidQuantity` - quantity ≤ 0
    /// - `ItemNotFound` - item id does not resolve
    /// - `InsufficientStock` - quantity exceeds the current system stock
    pub fn register_exit(&mut self, request: &ExitRequest) -> CoreResult<HistoryEntry> {
        debug!(item_id = %request.item_id, quantity = request.quantity, "register_exit");
        validate_quantity(request.quantity)?;

        let item = self
            .store
            .stock_items
            .iter_mut()
            .find(|i| i.id == request.item_id)
            .ok_or_else(|| CoreError::ItemNotFound(request.item_id.clone()))?;

        if request.quantity > item.system_stock {
            warn!(
                code = %item.code,
                available = item.system_stock,
                requested = request.quantity,
                "exit rejected"
            );
            return Err(CoreError::InsufficientStock {
                code: item.code.clone(),
                available: item.system_stock,
                requested: request.quantity,
            });
        }

        item.system_stock -= request.quantity;
        let code = item.code.clone();

        let exit = HistoryEntry::Exit {
            id: new_history_id(),
            date: Utc::now().date_naive(),
            quantity: request.quantity,
            user: self.store.actor.clone(),
            requester: request.requester.clone(),
            responsible: request.responsible.clone(),
        };
        self.prepend_history(&request.item_id, exit.clone());

        self.store.record_as_actor(format!(
            "Registered exit of {} unit(s) of item {} for {}.",
            request.quantity,
            code,
            or_na(&request.requester)
        ));

        Ok(exit)
    }

    fn prepend_history(&mut self, item_id: &str, entry: HistoryEntry) {
        self.store
            .history
            .entry(item_id.to_string())
            .or_default()
            .insert(0, entry);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::fixture;
    use crate::types::MovementKind;

    fn store() -> EntityStore {
        EntityStore::new(fixture())
    }

    fn exit(item_id: &str, quantity: i64) -> ExitRequest {
        ExitRequest {
            item_id: item_id.to_string(),
            quantity,
            requester: "Maintenance".to_string(),
            responsible: "Joana".to_string(),
        }
    }

    #[test]
    fn test_entry_increments_stock_and_records_history() {
        let mut store = store();
        let request = EntryRequest {
            item_id: "it-1".to_string(),
            quantity: 10,
            supplier: "Alcoa".to_string(),
            invoice_ref: "NF-778".to_string(),
            notes: String::new(),
        };

        store.movements().register_entry(&request).unwrap();

        assert_eq!(store.find_item("it-1").unwrap().system_stock, 50);
        let newest = &store.history("it-1")[0];
        assert_eq!(newest.kind(), MovementKind::Entry);
        assert_eq!(newest.quantity(), 10);
        match newest {
            HistoryEntry::Entry { details, user, .. } => {
                assert_eq!(details, "Supplier: Alcoa. Invoice: NF-778. Notes: N/A");
                assert_eq!(user, "Administrator");
            }
            other => panic!("expected entry, got {other:?}"),
        }
        assert_eq!(
            store.audit_logs()[0].action,
            "Registered entry of 10 unit(s) of item AL-001. Invoice: NF-778."
        );
    }

    #[test]
    fn test_entry_rejects_bad_quantity_and_unknown_item() {
        let mut store = store();
        let before = store.snapshot();

        assert!(matches!(
            store.movements().register_entry(&EntryRequest::new("it-1", 0)),
            Err(CoreError::InvalidQuantity(_))
        ));
        assert!(matches!(
            store.movements().register_entry(&EntryRequest::new("it-1", -5)),
            Err(CoreError::InvalidQuantity(_))
        ));
        assert!(matches!(
            store.movements().register_entry(&EntryRequest::new("nope", 5)),
            Err(CoreError::ItemNotFound(id)) if id == "nope"
        ));

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_entry_overflow_is_rejected() {
        let mut store = store();
        assert!(matches!(
            store.movements().register_entry(&EntryRequest::new("it-1", i64::MAX)),
            Err(CoreError::InvalidQuantity(_))
        ));
        assert_eq!(store.find_item("it-1").unwrap().system_stock, 40);
    }

    #[test]
    fn test_exit_decrements_stock() {
        let mut store = store();
        store.movements().register_exit(&exit("it-2", 3)).unwrap();

        assert_eq!(store.find_item("it-2").unwrap().system_stock, 0);
        match &store.history("it-2")[0] {
            HistoryEntry::Exit { requester, responsible, quantity, .. } => {
                assert_eq!(requester, "Maintenance");
                assert_eq!(responsible, "Joana");
                assert_eq!(*quantity, 3);
            }
            other => panic!("expected exit, got {other:?}"),
        }
        assert_eq!(
            store.audit_logs()[0].action,
            "Registered exit of 3 unit(s) of item VD-010 for Maintenance."
        );
    }

    #[test]
    fn test_exit_over_stock_changes_nothing() {
        let mut store = store();
        let before = store.snapshot();

        let err = store.movements().register_exit(&exit("it-2", 4)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock { available: 3, requested: 4, .. }
        ));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_stock_never_negative_over_sequence() {
        let mut store = store();
        let quantities = [2, 5, 1, 7, 3, 1, 9];
        for (i, q) in quantities.iter().enumerate() {
            if i % 3 == 0 {
                let _ = store.movements().register_entry(&EntryRequest::new("it-2", *q));
            } else {
                let _ = store.movements().register_exit(&exit("it-2", *q));
            }
            assert!(store.find_item("it-2").unwrap().system_stock >= 0);
        }
    }

    #[test]
    fn test_each_success_adds_one_audit_entry() {
        let mut store = store();
        store.movements().register_entry(&EntryRequest::new("it-3", 1)).unwrap();
        assert_eq!(store.audit_logs().len(), 1);
        store.movements().register_exit(&exit("it-3", 1)).unwrap();
        assert_eq!(store.audit_logs().len(), 2);
        let _ = store.movements().register_exit(&exit("it-3", 10_000));
        assert_eq!(store.audit_logs().len(), 2);
    }

    #[test]
    fn test_history_is_newest_first() {
        let mut store = store();
        store.movements().register_entry(&EntryRequest::new("it-1", 1)).unwrap();
        store.movements().register_exit(&exit("it-1", 2)).unwrap();

        let history = store.history("it-1");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].kind(), MovementKind::Exit);
        assert_eq!(history[1].kind(), MovementKind::Entry);
        assert!(history[0].id().starts_with("h-"));
        assert_ne!(history[0].id(), history[1].id());
    }
}
