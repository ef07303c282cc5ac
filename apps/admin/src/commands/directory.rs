//! # Directory Commands
//!
//! Users, suppliers and the audit page.
//!
//! The panel commands in [`control`](super::control) are the dashboard's
//! usual path to these operations; these are the direct calls behind them.

use stockroom_core::validation::validate_password_change;
use stockroom_core::{AuditLog, NewSupplier, NewUser, Supplier, User};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::StoreState;

// =============================================================================
// Users
// =============================================================================

pub async fn list_users(store: &StoreState) -> Result<Vec<User>, ApiError> {
    debug!("list_users command");
    Ok(store.with_store(|s| s.users().to_vec()).await)
}

/// The first administrator, shown as the signed-in user.
pub async fn current_admin(store: &StoreState) -> Result<Option<User>, ApiError> {
    debug!("current_admin command");
    Ok(store.with_store(|s| s.current_admin().cloned()).await)
}

/// ## Errors
/// - `DUPLICATE_EMAIL` - email already used, ignoring case
pub async fn add_user(store: &StoreState, new_user: NewUser) -> Result<User, ApiError> {
    debug!(email = %new_user.email, "add_user command");
    let user = store
        .with_store_mut(|s| s.directory().add_user(new_user))
        .await?;
    info!(id = user.id, "user added");
    Ok(user)
}

/// ## Errors
/// - `NOT_FOUND` - no user with this id
pub async fn update_user(store: &StoreState, user: User) -> Result<User, ApiError> {
    debug!(id = user.id, "update_user command");
    store
        .with_store_mut(|s| s.directory().update_user(user))
        .await
        .map_err(ApiError::from)
}

/// Deletes a user. An unknown id returns `None` and changes nothing.
pub async fn delete_user(store: &StoreState, id: i64) -> Result<Option<User>, ApiError> {
    debug!(id, "delete_user command");
    let removed = store.with_store_mut(|s| s.directory().delete_user(id)).await;
    if removed.is_none() {
        warn!(id, "delete_user: no such user");
    }
    Ok(removed)
}

/// ## Errors
/// - `PASSWORD_REJECTED` - mismatch or too short
///
/// Pure validation: the store is not locked.
pub async fn change_password(new_password: String, confirm_password: String) -> Result<(), ApiError> {
    debug!("change_password command");
    validate_password_change(&new_password, &confirm_password).map_err(ApiError::from)
}

// =============================================================================
// Suppliers
// =============================================================================

pub async fn list_suppliers(store: &StoreState) -> Result<Vec<Supplier>, ApiError> {
    debug!("list_suppliers command");
    Ok(store.with_store(|s| s.suppliers().to_vec()).await)
}

pub async fn add_supplier(
    store: &StoreState,
    new_supplier: NewSupplier,
) -> Result<Supplier, ApiError> {
    debug!(name = %new_supplier.name, "add_supplier command");
    let supplier = store
        .with_store_mut(|s| s.directory().add_supplier(new_supplier))
        .await?;
    info!(id = supplier.id, "supplier added");
    Ok(supplier)
}

pub async fn update_supplier(store: &StoreState, supplier: Supplier) -> Result<Supplier, ApiError> {
    debug!(id = supplier.id, "update_supplier command");
    store
        .with_store_mut(|s| s.directory().update_supplier(supplier))
        .await
        .map_err(ApiError::from)
}

pub async fn delete_supplier(store: &StoreState, id: i64) -> Result<Option<Supplier>, ApiError> {
    debug!(id, "delete_supplier command");
    let removed = store
        .with_store_mut(|s| s.directory().delete_supplier(id))
        .await;
    if removed.is_none() {
        warn!(id, "delete_supplier: no such supplier");
    }
    Ok(removed)
}

// =============================================================================
// Audit
// =============================================================================

/// The whole audit log, newest first.
pub async fn audit_log(store: &StoreState) -> Result<Vec<AuditLog>, ApiError> {
    debug!("audit_log command");
    Ok(store.with_store(|s| s.audit_logs().to_vec()).await)
}
