//! # Catalog Commands
//!
//! Read-only views of the stock catalog.
//!
//! ## Search Flow
//! ```text
//! Movement form: user types "glass"
//!       │
//!       ▼
//! search_items(query: "glass")
//!       │
//!       ▼
//! blank? ──► []            too long? ──► VALIDATION_ERROR
//!       │
//!       ▼
//! case-insensitive substring of code OR description
//!       │
//!       ▼
//! first `search_limit` items, catalog order
//! ```

use std::time::Instant;

use stockroom_core::{HistoryEntry, StockItem};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{AdminConfig, StoreState};

pub async fn list_items(store: &StoreState) -> Result<Vec<StockItem>, ApiError> {
    debug!("list_items command");
    Ok(store.with_store(|s| s.stock_items().to_vec()).await)
}

/// Item suggestions for the movement form.
pub async fn search_items(
    store: &StoreState,
    config: &AdminConfig,
    query: String,
) -> Result<Vec<StockItem>, ApiError> {
    let start = Instant::now();
    debug!(query = %query, limit = config.search_limit, "search_items command");

    let items = store
        .with_store(|s| {
            s.search_items(&query, config.search_limit)
                .map(|found| found.into_iter().cloned().collect::<Vec<_>>())
        })
        .await?;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = items.len(),
        "search_items complete"
    );
    Ok(items)
}

/// Movement history of one item, newest first.
///
/// ## Errors
/// `NOT_FOUND` if the item does not exist. An existing item that never
/// moved returns an empty list.
pub async fn item_history(
    store: &StoreState,
    item_id: String,
) -> Result<Vec<HistoryEntry>, ApiError> {
    debug!(item_id = %item_id, "item_history command");
    store
        .with_store(|s| {
            s.find_item(&item_id)
                .map(|_| s.history(&item_id).to_vec())
                .ok_or_else(|| ApiError::not_found("Item", &item_id))
        })
        .await
}

/// Items at or below their minimum stock.
pub async fn low_stock_items(store: &StoreState) -> Result<Vec<StockItem>, ApiError> {
    debug!("low_stock_items command");
    Ok(store
        .with_store(|s| s.items_below_minimum().into_iter().cloned().collect())
        .await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::demo_store;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_search_items_uses_configured_limit() {
        let store = demo_store();
        let mut config = AdminConfig::default();

        let found = search_items(&store, &config, "e".to_string()).await.unwrap();
        assert_eq!(found.len(), 5);

        config.search_limit = 2;
        let found = search_items(&store, &config, "e".to_string()).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, "it-1");
    }

    #[tokio::test]
    async fn test_search_rejects_overlong_query() {
        let store = demo_store();
        let err = search_items(&store, &AdminConfig::default(), "x".repeat(101))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_item_history() {
        let store = demo_store();
        let history = item_history(&store, "it-1".to_string()).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id(), "h-demo-2");

        assert!(item_history(&store, "it-4".to_string()).await.unwrap().is_empty());
        let err = item_history(&store, "nope".to_string()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_low_stock_items() {
        let store = demo_store();
        let low: Vec<String> = low_stock_items(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(low, vec!["it-2".to_string(), "it-4".to_string()]);
    }
}
