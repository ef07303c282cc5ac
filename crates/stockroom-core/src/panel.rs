//! # Slide-over Panel
//!
//! Draft state for the control panel's create/edit forms.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │          open_*(target)                     save() Ok                   │
//! │  ┌────────┐ ───────────────► ┌──────────────┐ ──────────► ┌────────┐  │
//! │  │ Closed │                  │ Open(draft)  │             │ Closed │  │
//! │  └────────┘ ◄─────────────── └──────┬───────┘             └────────┘  │
//! │                 cancel()            │ save() Err                       │
//! │           (draft dropped,           ▼                                   │
//! │            store untouched)   stays Open, draft kept                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each draft variant carries only the fields its form edits.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::store::EntityStore;
use crate::types::{NewSupplier, NewUser, Supplier, User};
use crate::validation::validate_required;

// =============================================================================
// Modes and Drafts
// =============================================================================

/// Which form the panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum PanelMode {
    AddUser,
    EditUser,
    ChangePassword,
    AddSupplier,
    EditSupplier,
}

/// The unsaved form contents, keyed by mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "mode", content = "draft", rename_all = "camelCase")]
pub enum PanelDraft {
    AddUser(NewUser),
    EditUser(User),
    ChangePassword(PasswordDraft),
    AddSupplier(NewSupplier),
    EditSupplier(Supplier),
}

/// Password form for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PasswordDraft {
    pub user: User,
    pub new_password: String,
    pub confirm_password: String,
}

impl PanelDraft {
    pub fn mode(&self) -> PanelMode {
        match self {
            PanelDraft::AddUser(_) => PanelMode::AddUser,
            PanelDraft::EditUser(_) => PanelMode::EditUser,
            PanelDraft::ChangePassword(_) => PanelMode::ChangePassword,
            PanelDraft::AddSupplier(_) => PanelMode::AddSupplier,
            PanelDraft::EditSupplier(_) => PanelMode::EditSupplier,
        }
    }

    /// Required-field checks of the form.
    fn validate(&self) -> CoreResult<()> {
        match self {
            PanelDraft::AddUser(u) => {
                validate_required("name", &u.name)?;
                validate_required("email", &u.email)?;
            }
            PanelDraft::EditUser(u) => {
                validate_required("name", &u.name)?;
                validate_required("email", &u.email)?;
            }
            PanelDraft::ChangePassword(p) => {
                validate_required("new password", &p.new_password)?;
                validate_required("confirm password", &p.confirm_password)?;
            }
            PanelDraft::AddSupplier(s) => validate_required("name", &s.name)?,
            PanelDraft::EditSupplier(s) => validate_required("name", &s.name)?,
        }
        Ok(())
    }
}

/// What a successful save did, for the dashboard's confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "record", rename_all = "camelCase")]
pub enum PanelOutcome {
    UserAdded(User),
    UserUpdated(User),
    /// Carries the name of the user whose password was changed.
    PasswordChanged(String),
    SupplierAdded(Supplier),
    SupplierUpdated(Supplier),
}

// =============================================================================
// Panel State
// =============================================================================

/// Open/closed state of the slide-over panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "state", content = "panel", rename_all = "camelCase")]
pub enum PanelState {
    #[default]
    Closed,
    Open(PanelDraft),
}

impl PanelState {
    /// Opens the panel on `draft`, replacing whatever was open.
    pub fn open(&mut self, draft: PanelDraft) {
        debug!(mode = ?draft.mode(), "panel open");
        *self = PanelState::Open(draft);
    }

    pub fn open_add_user(&mut self) {
        self.open(PanelDraft::AddUser(NewUser::default()));
    }

    pub fn open_edit_user(&mut self, user: User) {
        self.open(PanelDraft::EditUser(user));
    }

    pub fn open_change_password(&mut self, user: User) {
        self.open(PanelDraft::ChangePassword(PasswordDraft {
            user,
            new_password: String::new(),
            confirm_password: String::new(),
        }));
    }

    pub fn open_add_supplier(&mut self) {
        self.open(PanelDraft::AddSupplier(NewSupplier::default()));
    }

    pub fn open_edit_supplier(&mut self, supplier: Supplier) {
        self.open(PanelDraft::EditSupplier(supplier));
    }

    pub fn is_open(&self) -> bool {
        matches!(self, PanelState::Open(_))
    }

    pub fn mode(&self) -> Option<PanelMode> {
        self.draft().map(PanelDraft::mode)
    }

    pub fn draft(&self) -> Option<&PanelDraft> {
        match self {
            PanelState::Open(draft) => Some(draft),
            PanelState::Closed => None,
        }
    }

    /// Mutable draft for form input.
    pub fn draft_mut(&mut self) -> Option<&mut PanelDraft> {
        match self {
            PanelState::Open(draft) => Some(draft),
            PanelState::Closed => None,
        }
    }

    /// Discards the draft. The store is not touched.
    pub fn cancel(&mut self) {
        debug!("panel cancel");
        *self = PanelState::Closed;
    }

    /// Validates the draft, dispatches the matching operation and closes.
    ///
    /// On any error the panel stays open with the draft as it was.
    ///
    /// ## Errors
    /// - `PanelClosed` - nothing to save
    /// - `Validation` - a required field is blank
    /// - whatever the dispatched directory operation returns
    pub fn save(&mut self, store: &mut EntityStore) -> CoreResult<PanelOutcome> {
        let draft = self.draft().ok_or(CoreError::PanelClosed)?;
        draft.validate()?;

        let mut directory = store.directory();
        let outcome = match draft {
            PanelDraft::AddUser(new_user) => {
                PanelOutcome::UserAdded(directory.add_user(new_user.clone())?)
            }
            PanelDraft::EditUser(user) => {
                PanelOutcome::UserUpdated(directory.update_user(user.clone())?)
            }
            PanelDraft::ChangePassword(p) => {
                directory.change_password(&p.new_password, &p.confirm_password)?;
                PanelOutcome::PasswordChanged(p.user.name.clone())
            }
            PanelDraft::AddSupplier(new_supplier) => {
                PanelOutcome::SupplierAdded(directory.add_supplier(new_supplier.clone())?)
            }
            PanelDraft::EditSupplier(supplier) => {
                PanelOutcome::SupplierUpdated(directory.update_supplier(supplier.clone())?)
            }
        };

        debug!(?outcome, "panel saved");
        *self = PanelState::Closed;
        Ok(outcome)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
