//! # Control Panel State
//!
//! The slide-over panel and the pending delete of the control panel page.
//! Both are view state only: nothing here reaches the store until a save or
//! a confirm.

use std::sync::Arc;

use stockroom_core::confirm::DeleteConfirmation;
use stockroom_core::panel::PanelState;
use tokio::sync::{Mutex, MutexGuard};

/// Panel plus delete confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlPanel {
    pub panel: PanelState,
    pub confirmation: DeleteConfirmation,
}

/// Control panel state managed by the app.
#[derive(Debug, Clone, Default)]
pub struct ControlState {
    control: Arc<Mutex<ControlPanel>>,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds the control lock across a store call.
    ///
    /// Take this before the store lock, never after.
    pub async fn lock(&self) -> MutexGuard<'_, ControlPanel> {
        self.control.lock().await
    }

    pub async fn with_control<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ControlPanel) -> R,
    {
        let control = self.control.lock().await;
        f(&control)
    }

    pub async fn with_control_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ControlPanel) -> R,
    {
        let mut control = self.control.lock().await;
        f(&mut control)
    }
}
