//! # Movement Commands
//!
//! Stock entries and exits from the movement page.
//!
//! ## Form Flow
//! ```text
//! EntryForm { itemId, quantity: "12", supplier, invoiceRef, notes }
//!       │
//!       ▼
//! parse_quantity("12") ──► not a positive number? INVALID_QUANTITY
//!       │
//!       ▼
//! store lock held ─► check ─► mutate stock ─► history ─► audit
//!       │
//!       ▼
//! HistoryEntry returned (the new first row of the item's history)
//! ```

use serde::{Deserialize, Serialize};
use stockroom_core::movement::{EntryRequest, ExitRequest};
use stockroom_core::validation::parse_quantity;
use stockroom_core::HistoryEntry;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::StoreState;

/// Entry form as typed; quantity is raw text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryForm {
    pub item_id: String,
    pub quantity: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub invoice_ref: String,
    #[serde(default)]
    pub notes: String,
}

impl TryFrom<EntryForm> for EntryRequest {
    type Error = ApiError;

    fn try_from(form: EntryForm) -> Result<Self, Self::Error> {
        Ok(EntryRequest {
            quantity: parse_quantity(&form.quantity)?,
            item_id: form.item_id,
            supplier: form.supplier,
            invoice_ref: form.invoice_ref,
            notes: form.notes,
        })
    }
}

/// Exit form as typed; quantity is raw text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitForm {
    pub item_id: String,
    pub quantity: String,
    #[serde(default)]
    pub requester: String,
    #[serde(default)]
    pub responsible: String,
}

impl TryFrom<ExitForm> for ExitRequest {
    type Error = ApiError;

    fn try_from(form: ExitForm) -> Result<Self, Self::Error> {
        Ok(ExitRequest {
            quantity: parse_quantity(&form.quantity)?,
            item_id: form.item_id,
            requester: form.requester,
            responsible: form.responsible,
        })
    }
}

/// Registers a stock entry.
///
/// ## Errors
/// - `INVALID_QUANTITY` - not a positive whole number
/// - `NOT_FOUND` - unknown item
pub async fn register_entry(store: &StoreState, form: EntryForm) -> Result<HistoryEntry, ApiError> {
    debug!(item_id = %form.item_id, quantity = %form.quantity, "register_entry command");
    let request = EntryRequest::try_from(form)?;

    let entry = store
        .with_store_mut(|s| s.movements().register_entry(&request))
        .await
        .inspect_err(|e| warn!(item_id = %request.item_id, error = %e, "entry rejected"))?;

    info!(item_id = %request.item_id, quantity = request.quantity, "entry registered");
    Ok(entry)
}

/// Registers a stock exit.
///
/// ## Errors
/// - `INVALID_QUANTITY` - not a positive whole number
/// - `NOT_FOUND` - unknown item
/// - `INSUFFICIENT_STOCK` - more than is on hand
pub async fn register_exit(store: &StoreState, form: ExitForm) -> Result<HistoryEntry, ApiError> {
    debug!(item_id = %form.item_id, quantity = %form.quantity, "register_exit command");
    let request = ExitRequest::try_from(form)?;

    let exit = store
        .with_store_mut(|s| s.movements().register_exit(&request))
        .await
        .inspect_err(|e| warn!(item_id = %request.item_id, error = %e, "exit rejected"))?;

    info!(item_id = %request.item_id, quantity = request.quantity, "exit registered");
    Ok(exit)
}
