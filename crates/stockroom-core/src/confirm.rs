//! # Delete Confirmation
//!
//! Two-step delete: select a user or supplier, then confirm or dismiss.
//!
//! ```text
//!   request_*(record) ──► pending ──┬── confirm() ──► directory delete, cleared
//!                                   └── dismiss() ──► cleared, store untouched
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::store::EntityStore;
use crate::types::{Supplier, User};

/// A record selected for deletion, or the record a confirm removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "record", rename_all = "camelCase")]
pub enum DeleteTarget {
    User(User),
    Supplier(Supplier),
}

/// Pending-delete selection of the control panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeleteConfirmation {
    pending: Option<DeleteTarget>,
}

impl DeleteConfirmation {
    pub fn request_user(&mut self, user: User) {
        debug!(id = user.id, "delete requested: user");
        self.pending = Some(DeleteTarget::User(user));
    }

    pub fn request_supplier(&mut self, supplier: Supplier) {
        debug!(id = supplier.id, "delete requested: supplier");
        self.pending = Some(DeleteTarget::Supplier(supplier));
    }

    pub fn pending(&self) -> Option<&DeleteTarget> {
        self.pending.as_ref()
    }

    /// Deletes the pending record and clears the selection.
    ///
    /// Returns the removed record, or `None` when nothing was pending or the
    /// record had already disappeared from the store.
    pub fn confirm(&mut self, store: &mut EntityStore) -> Option<DeleteTarget> {
        match self.pending.take()? {
            DeleteTarget::User(user) => store.directory().delete_user(user.id).map(DeleteTarget::User),
            DeleteTarget::Supplier(supplier) => store
                .directory()
                .delete_supplier(supplier.id)
                .map(DeleteTarget::Supplier),
        }
    }

    /// Clears the selection without touching the store.
    pub fn dismiss(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::fixture;

    #[test]
    fn test_confirm_deletes_and_clears() {
        let mut store = EntityStore::new(fixture());
        let mut confirmation = DeleteConfirmation::default();

        confirmation.request_user(store.find_user(1).unwrap().clone());
        let removed = confirmation.confirm(&mut store);

        assert!(matches!(removed, Some(DeleteTarget::User(ref u)) if u.id == 1));
        assert!(confirmation.pending().is_none());
        assert!(store.find_user(1).is_none());
        assert_eq!(store.audit_logs().len(), 1);
    }

    #[test]
    fn test_dismiss_leaves_store_alone() {
        let mut store = EntityStore::new(fixture());
        let before = store.snapshot();
        let mut confirmation = DeleteConfirmation::default();

        confirmation.request_supplier(store.find_supplier(10).unwrap().clone());
        confirmation.dismiss();

        assert!(confirmation.pending().is_none());
        assert!(confirmation.confirm(&mut store).is_none());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_confirm_of_vanished_record_is_noop() {
        let mut store = EntityStore::new(fixture());
        let mut confirmation = DeleteConfirmation::default();

        confirmation.request_supplier(store.find_supplier(10).unwrap().clone());
        store.directory().delete_supplier(10);
        assert!(confirmation.confirm(&mut store).is_none());
        assert_eq!(store.audit_logs().len(), 1);
    }
}
