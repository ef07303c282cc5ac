//! # Store State
//!
//! Shared ownership of the one `EntityStore`.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several commands read and write it
//! 2. A movement's stock check and its update must not interleave with
//!    another writer
//! 3. Commands can run concurrently
//!
//! The closure passed to [`StoreState::with_store_mut`] runs with the lock
//! held, so one command's check-and-mutate is a single critical section.

use std::sync::Arc;

use stockroom_core::{EntityStore, Snapshot};
use tokio::sync::Mutex;

/// Store state managed by the app.
#[derive(Debug, Clone)]
pub struct StoreState {
    store: Arc<Mutex<EntityStore>>,
}

impl StoreState {
    pub fn new(store: EntityStore) -> Self {
        StoreState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Seeds a store from `snapshot`, auditing as `actor`.
    pub fn seeded(snapshot: Snapshot, actor: impl Into<String>) -> Self {
        Self::new(EntityStore::new(snapshot).with_actor(actor))
    }

    /// Runs `f` with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let users = state.with_store(|store| store.users().to_vec()).await;
    /// ```
    pub async fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&EntityStore) -> R,
    {
        let store = self.store.lock().await;
        f(&store)
    }

    /// Runs `f` with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_store_mut(|store| store.movements().register_exit(&req)).await?;
    /// ```
    pub async fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut EntityStore) -> R,
    {
        let mut store = self.store.lock().await;
        f(&mut store)
    }
}

impl Default for StoreState {
    fn default() -> Self {
        Self::new(EntityStore::default())
    }
}
