//! # Control Panel Commands
//!
//! Drives the slide-over panel and the two-step delete.
//!
//! ## Panel Flow
//! ```text
//! open_panel_edit_user(id) ──► draft = copy of the user
//!        │
//!        ▼
//! edit_panel(draft) ... edit_panel(draft)      (form input, store untouched)
//!        │
//!        ├── cancel_panel() ──► closed, draft dropped
//!        │
//!        ▼
//! save_panel() ──► Ok: closed, PanelOutcome
//!              └─► Err: still open, draft kept
//! ```
//!
//! Lock order is control, then store.

use stockroom_core::confirm::DeleteTarget;
use stockroom_core::panel::{PanelDraft, PanelOutcome, PanelState};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ControlState, StoreState};

// =============================================================================
// Panel
// =============================================================================

/// Current panel state for rendering.
pub async fn get_panel(control: &ControlState) -> Result<PanelState, ApiError> {
    Ok(control.with_control(|c| c.panel.clone()).await)
}

pub async fn open_panel_add_user(control: &ControlState) -> Result<PanelState, ApiError> {
    debug!("open_panel_add_user command");
    Ok(control
        .with_control_mut(|c| {
            c.panel.open_add_user();
            c.panel.clone()
        })
        .await)
}

pub async fn open_panel_edit_user(
    store: &StoreState,
    control: &ControlState,
    user_id: i64,
) -> Result<PanelState, ApiError> {
    debug!(user_id, "open_panel_edit_user command");
    let user = store
        .with_store(|s| s.find_user(user_id).cloned())
        .await
        .ok_or_else(|| ApiError::not_found("User", user_id))?;
    Ok(control
        .with_control_mut(|c| {
            c.panel.open_edit_user(user);
            c.panel.clone()
        })
        .await)
}

pub async fn open_panel_change_password(
    store: &StoreState,
    control: &ControlState,
    user_id: i64,
) -> Result<PanelState, ApiError> {
    debug!(user_id, "open_panel_change_password command");
    let user = store
        .with_store(|s| s.find_user(user_id).cloned())
        .await
        .ok_or_else(|| ApiError::not_found("User", user_id))?;
    Ok(control
        .with_control_mut(|c| {
            c.panel.open_change_password(user);
            c.panel.clone()
        })
        .await)
}

pub async fn open_panel_add_supplier(control: &ControlState) -> Result<PanelState, ApiError> {
    debug!("open_panel_add_supplier command");
    Ok(control
        .with_control_mut(|c| {
            c.panel.open_add_supplier();
            c.panel.clone()
        })
        .await)
}

pub async fn open_panel_edit_supplier(
    store: &StoreState,
    control: &ControlState,
    supplier_id: i64,
) -> Result<PanelState, ApiError> {
    debug!(supplier_id, "open_panel_edit_supplier command");
    let supplier = store
        .with_store(|s| s.find_supplier(supplier_id).cloned())
        .await
        .ok_or_else(|| ApiError::not_found("Supplier", supplier_id))?;
    Ok(control
        .with_control_mut(|c| {
            c.panel.open_edit_supplier(supplier);
            c.panel.clone()
        })
        .await)
}

/// Replaces the open draft with what the form currently holds.
///
/// ## Errors
/// `INVALID_STATE` if the panel is closed or shows a different form.
pub async fn edit_panel(control: &ControlState, draft: PanelDraft) -> Result<(), ApiError> {
    control
        .with_control_mut(|c| match c.panel.draft_mut() {
            Some(current) if current.mode() == draft.mode() => {
                *current = draft;
                Ok(())
            }
            Some(current) => Err(ApiError::invalid_state(format!(
                "Panel shows {:?}, not {:?}",
                current.mode(),
                draft.mode()
            ))),
            None => Err(ApiError::invalid_state("No panel is open")),
        })
        .await
}

/// Saves the open draft. The panel closes only on success.
pub async fn save_panel(
    store: &StoreState,
    control: &ControlState,
) -> Result<PanelOutcome, ApiError> {
    debug!("save_panel command");
    let mut control = control.lock().await;
    let outcome = store
        .with_store_mut(|s| control.panel.save(s))
        .await?;
    info!(?outcome, "panel saved");
    Ok(outcome)
}

pub async fn cancel_panel(control: &ControlState) -> Result<(), ApiError> {
    debug!("cancel_panel command");
    control.with_control_mut(|c| c.panel.cancel()).await;
    Ok(())
}

// =============================================================================
// Delete Confirmation
// =============================================================================

pub async fn request_delete_user(
    store: &StoreState,
    control: &ControlState,
    user_id: i64,
) -> Result<DeleteTarget, ApiError> {
    debug!(user_id, "request_delete_user command");
    let user = store
        .with_store(|s| s.find_user(user_id).cloned())
        .await
        .ok_or_else(|| ApiError::not_found("User", user_id))?;
    Ok(control
        .with_control_mut(|c| {
            c.confirmation.request_user(user.clone());
            DeleteTarget::User(user)
        })
        .await)
}

pub async fn request_delete_supplier(
    store: &StoreState,
    control: &ControlState,
    supplier_id: i64,
) -> Result<DeleteTarget, ApiError> {
    debug!(supplier_id, "request_delete_supplier command");
    let supplier = store
        .with_store(|s| s.find_supplier(supplier_id).cloned())
        .await
        .ok_or_else(|| ApiError::not_found("Supplier", supplier_id))?;
    Ok(control
        .with_control_mut(|c| {
            c.confirmation.request_supplier(supplier.clone());
            DeleteTarget::Supplier(supplier)
        })
        .await)
}

pub async fn pending_delete(control: &ControlState) -> Result<Option<DeleteTarget>, ApiError> {
    Ok(control
        .with_control(|c| c.confirmation.pending().cloned())
        .await)
}

/// Deletes the pending record.
///
/// Returns what was removed; `None` if nothing was pending or the record had
/// already gone.
pub async fn confirm_delete(
    store: &StoreState,
    control: &ControlState,
) -> Result<Option<DeleteTarget>, ApiError> {
    debug!("confirm_delete command");
    let mut control = control.lock().await;
    let removed = store
        .with_store_mut(|s| control.confirmation.confirm(s))
        .await;
    info!(?removed, "delete confirmed");
    Ok(removed)
}

pub async fn dismiss_delete(control: &ControlState) -> Result<(), ApiError> {
    debug!("dismiss_delete command");
    control.with_control_mut(|c| c.confirmation.dismiss()).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::directory::{audit_log, list_users};
    use crate::commands::test_support::demo_store;
    use crate::error::ErrorCode;
    use stockroom_core::NewUser;

    #[tokio::test]
    async fn test_add_user_through_panel() {
        let store = demo_store();
        let control = ControlState::new();

        open_panel_add_user(&control).await.unwrap();
        edit_panel(
            &control,
            PanelDraft::AddUser(NewUser {
                name: "Nina Sá".to_string(),
                email: "nina@stockroom.test".to_string(),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        let outcome = save_panel(&store, &control).await.unwrap();
        assert!(matches!(outcome, PanelOutcome::UserAdded(ref u) if u.name == "Nina Sá"));
        assert_eq!(get_panel(&control).await.unwrap(), PanelState::Closed);
        assert_eq!(list_users(&store).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft() {
        let store = demo_store();
        let control = ControlState::new();

        open_panel_edit_user(&store, &control, 2).await.unwrap();
        let mut draft = match get_panel(&control).await.unwrap() {
            PanelState::Open(PanelDraft::EditUser(user)) => user,
            other => panic!("unexpected panel {other:?}"),
        };
        draft.name = "   ".to_string();
        edit_panel(&control, PanelDraft::EditUser(draft.clone()))
            .await
            .unwrap();

        let err = save_panel(&store, &control).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            get_panel(&control).await.unwrap(),
            PanelState::Open(PanelDraft::EditUser(draft))
        );
        assert!(audit_log(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_panel_mode_mismatch() {
        let control = ControlState::new();
        let err = edit_panel(&control, PanelDraft::AddUser(NewUser::default()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);

        open_panel_add_supplier(&control).await.unwrap();
        let err = edit_panel(&control, PanelDraft::AddUser(NewUser::default()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
    }

    #[tokio::test]
    async fn test_open_for_unknown_user() {
        let store = demo_store();
        let control = ControlState::new();
        let err = open_panel_change_password(&store, &control, 99)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(!get_panel(&control).await.unwrap().is_open());
    }

    #[tokio::test]
    async fn test_cancel_leaves_store_alone() {
        let store = demo_store();
        let control = ControlState::new();

        open_panel_edit_supplier(&store, &control, 101).await.unwrap();
        cancel_panel(&control).await.unwrap();

        assert_eq!(get_panel(&control).await.unwrap(), PanelState::Closed);
        assert!(audit_log(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_confirm_and_dismiss() {
        let store = demo_store();
        let control = ControlState::new();

        request_delete_user(&store, &control, 3).await.unwrap();
        dismiss_delete(&control).await.unwrap();
        assert!(pending_delete(&control).await.unwrap().is_none());
        assert_eq!(list_users(&store).await.unwrap().len(), 3);

        request_delete_supplier(&store, &control, 103).await.unwrap();
        let removed = confirm_delete(&store, &control).await.unwrap();
        assert!(matches!(removed, Some(DeleteTarget::Supplier(ref s)) if s.id == 103));
        assert!(pending_delete(&control).await.unwrap().is_none());
        assert_eq!(audit_log(&store).await.unwrap()[0].action, "Deleted supplier Cristal Glassworks.");

        // nothing pending: no-op
        assert!(confirm_delete(&store, &control).await.unwrap().is_none());
    }
}
