//! # Directory Manager
//!
//! Create, update and delete flows for users and suppliers.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_user        email unique (case-insensitive) else DuplicateEmail  │
//! │                  generated id + default avatar, prepended, audited    │
//! │  update_user     replace by id, audited (email NOT re-checked)        │
//! │  delete_user     remove by id, audited; unknown id = no-op, no audit  │
//! │  change_password match + length rules only (no credential store)      │
//! │                                                                         │
//! │  add/update/delete_supplier   same shape, no email uniqueness         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::store::EntityStore;
use crate::types::{NewSupplier, NewUser, Supplier, User};
use crate::validation::validate_password_change;
use crate::AVATAR_BASE_URL;

/// Default avatar reference for a new user.
pub fn default_avatar_url(email: &str) -> String {
    format!("{AVATAR_BASE_URL}{}", email.trim())
}

/// Maintains users and suppliers of one store. Obtain with
/// [`EntityStore::directory`].
#[derive(Debug)]
pub struct DirectoryManager<'a> {
    store: &'a mut EntityStore,
}

impl<'a> DirectoryManager<'a> {
    pub(crate) fn new(store: &'a mut EntityStore) -> Self {
        DirectoryManager { store }
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Creates a user.
    ///
    /// ## Errors
    /// - `DuplicateEmail` - another user has the same email, ignoring case
    pub fn add_user(&mut self, new_user: NewUser) -> CoreResult<User> {
        let email = new_user.email.trim().to_string();
        debug!(%email, "add_user");

        if self.store.users.iter().any(|u| u.has_email(&email)) {
            warn!(%email, "duplicate email");
            return Err(CoreError::DuplicateEmail(email));
        }

        let user = User {
            id: self.store.ids.next_id(),
            avatar_url: default_avatar_url(&email),
            name: new_user.name,
            email,
            profile: new_user.profile,
        };
        self.store.users.insert(0, user.clone());
        self.store
            .record_as_actor(format!("Created user {}.", user.name));

        Ok(user)
    }

    /// Replaces the user with the same id.
    ///
    /// Email uniqueness is not re-checked here; see DESIGN.md.
    ///
    /// ## Errors
    /// - `UserNotFound` - no user has this id
    pub fn update_user(&mut self, user: User) -> CoreResult<User> {
        debug!(id = user.id, "update_user");

        let slot = self
            .store
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(CoreError::UserNotFound(user.id))?;
        *slot = user.clone();

        self.store
            .record_as_actor(format!("Updated user {}.", user.name));

        Ok(user)
    }

    /// Removes a user by id and returns it.
    ///
    /// Unknown ids are a silent no-op: `None`, and nothing is audited.
    pub fn delete_user(&mut self, id: i64) -> Option<User> {
        debug!(id, "delete_user");

        let index = self.store.users.iter().position(|u| u.id == id)?;
        let removed = self.store.users.remove(index);
        self.store
            .record_as_actor(format!("Deleted user {}.", removed.name));

        Some(removed)
    }

    /// Validates a password change.
    ///
    /// There is no credential store: success is only a confirmation for the
    /// dashboard, and nothing is audited.
    ///
    /// ## Errors
    /// - `PasswordMismatch` - the two values differ
    /// - `PasswordTooShort` - fewer than six characters
    pub fn change_password(&self, new_password: &str, confirm_password: &str) -> CoreResult<()> {
        validate_password_change(new_password, confirm_password)
    }

    // =========================================================================
    // Suppliers
    // =========================================================================

    pub fn add_supplier(&mut self, new_supplier: NewSupplier) -> CoreResult<Supplier> {
        debug!(name = %new_supplier.name, "add_supplier");

        let supplier = Supplier {
            id: self.store.ids.next_id(),
            name: new_supplier.name,
            contact: new_supplier.contact,
            email: new_supplier.email,
            phone: new_supplier.phone,
        };
        self.store.suppliers.insert(0, supplier.clone());
        self.store
            .record_as_actor(format!("Added supplier {}.", supplier.name));

        Ok(supplier)
    }

    /// ## Errors
    /// - `SupplierNotFound` - no supplier has this id
    pub fn update_supplier(&mut self, supplier: Supplier) -> CoreResult<Supplier> {
        debug!(id = supplier.id, "update_supplier");

        let slot = self
            .store
            .suppliers
            .iter_mut()
            .find(|s| s.id == supplier.id)
            .ok_or(CoreError::SupplierNotFound(supplier.id))?;
        *slot = supplier.clone();

        self.store
            .record_as_actor(format!("Updated supplier {}.", supplier.name));

        Ok(supplier)
    }

    /// Same no-op contract as [`delete_user`](Self::delete_user).
    pub fn delete_supplier(&mut self, id: i64) -> Option<Supplier> {
        debug!(id, "delete_supplier");

        let index = self.store.suppliers.iter().position(|s| s.id == id)?;
        let removed = self.store.suppliers.remove(index);
        self.store
            .record_as_actor(format!("Deleted supplier {}.", removed.name));

        Some(removed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::fixture;
    use crate::types::Profile;

    fn store() -> EntityStore {
        EntityStore::new(fixture())
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Carla".to_string(),
            email: email.to_string(),
            profile: Profile::Operator,
        }
    }

    #[test]
    fn test_add_user_prepends_and_audits() {
        let mut store = store();
        let user = store.directory().add_user(new_user("carla@stockroom.test")).unwrap();

        assert_eq!(store.users()[0], user);
        assert_eq!(store.users().len(), 3);
        assert_eq!(user.avatar_url, "https://i.pravatar.cc/150?u=carla@stockroom.test");
        assert!(store.users()[1..].iter().all(|u| u.id != user.id));
        assert_eq!(store.audit_logs()[0].action, "Created user Carla.");
    }

    #[test]
    fn test_add_user_duplicate_email_ignores_case() {
        let mut store = store();
        let before = store.users().to_vec();

        let err = store
            .directory()
            .add_user(new_user("ADMIN@stockroom.TEST"))
            .unwrap_err();

        assert!(matches!(err, CoreError::DuplicateEmail(_)));
        assert_eq!(store.users(), before.as_slice());
        assert!(store.audit_logs().is_empty());
    }

    #[test]
    fn test_add_user_trims_email_in_either_order() {
        let mut store = store();
        let padded = store.directory().add_user(new_user(" dup@x.test ")).unwrap();
        assert_eq!(padded.email, "dup@x.test");
        assert!(matches!(
            store.directory().add_user(new_user("dup@x.test")),
            Err(CoreError::DuplicateEmail(_))
        ));

        let mut store = EntityStore::new(fixture());
        store.directory().add_user(new_user("dup@x.test")).unwrap();
        assert!(matches!(
            store.directory().add_user(new_user(" DUP@x.test ")),
            Err(CoreError::DuplicateEmail(_))
        ));
        assert_eq!(store.users().len(), 3);
    }

    #[test]
    fn test_update_user_replaces_by_id() {
        let mut store = store();
        let mut user = store.find_user(1).unwrap().clone();
        user.name = "Operator Renamed".to_string();
        user.avatar_url = "blob:avatar".to_string();

        store.directory().update_user(user.clone()).unwrap();

        assert_eq!(store.find_user(1), Some(&user));
        assert_eq!(store.users().len(), 2);
        assert_eq!(store.audit_logs()[0].action, "Updated user Operator Renamed.");
    }

    #[test]
    fn test_update_user_does_not_recheck_email() {
        let mut store = store();
        let mut user = store.find_user(1).unwrap().clone();
        user.email = "admin@stockroom.test".to_string();
        assert!(store.directory().update_user(user).is_ok());
    }

    #[test]
    fn test_update_unknown_user_fails_without_audit() {
        let mut store = store();
        let mut ghost = store.find_user(1).unwrap().clone();
        ghost.id = 999;
        assert!(matches!(
            store.directory().update_user(ghost),
            Err(CoreError::UserNotFound(999))
        ));
        assert!(store.audit_logs().is_empty());
    }

    #[test]
    fn test_delete_user() {
        let mut store = store();
        let removed = store.directory().delete_user(2).unwrap();
        assert_eq!(removed.name, "Admin");
        assert!(store.find_user(2).is_none());
        assert_eq!(store.audit_logs()[0].action, "Deleted user Admin.");

        // unknown id: no change, no audit
        assert!(store.directory().delete_user(2).is_none());
        assert_eq!(store.audit_logs().len(), 1);
    }

    #[test]
    fn test_change_password() {
        let mut store = store();
        let directory = store.directory();
        assert!(directory.change_password("abcdef", "abcdef").is_ok());
        assert!(matches!(
            directory.change_password("abcdef", "abcdeg"),
            Err(CoreError::PasswordMismatch)
        ));
        assert!(matches!(
            directory.change_password("abc", "abc"),
            Err(CoreError::PasswordTooShort { .. })
        ));
        assert!(store.audit_logs().is_empty());
    }

    #[test]
    fn test_supplier_lifecycle() {
        let mut store = store();

        let added = store
            .directory()
            .add_supplier(NewSupplier {
                name: "Hydro".to_string(),
                contact: "Paulo".to_string(),
                email: "sales@alcoa.test".to_string(),
                phone: String::new(),
            })
            .unwrap();
        assert_eq!(store.suppliers()[0], added);
        assert_eq!(store.audit_logs()[0].action, "Added supplier Hydro.");

        let mut edited = added.clone();
        edited.phone = "555-0199".to_string();
        store.directory().update_supplier(edited).unwrap();
        assert_eq!(store.find_supplier(added.id).unwrap().phone, "555-0199");

        assert!(store.directory().delete_supplier(added.id).is_some());
        assert!(store.directory().delete_supplier(added.id).is_none());
        assert_eq!(store.suppliers().len(), 1);
        assert_eq!(store.audit_logs().len(), 3);
        assert_eq!(store.audit_logs()[0].action, "Deleted supplier Hydro.");
    }

    #[test]
    fn test_update_unknown_supplier_fails() {
        let mut store = store();
        let mut ghost = store.find_supplier(10).unwrap().clone();
        ghost.id = 11;
        assert!(matches!(
            store.directory().update_supplier(ghost),
            Err(CoreError::SupplierNotFound(11))
        ));
    }
}
