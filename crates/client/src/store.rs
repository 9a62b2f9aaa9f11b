//! Application state owned by the dispatch loop.
//!
//! The aggregate has exactly one writer (the dispatcher); there is no
//! process-wide global to mutate from callbacks. Each update replaces
//! its field wholesale, so a reader never observes a half-applied
//! value, and the two fields are never updated in the same transaction.

use readyview_shared::{Alert, Inventory};

/// The latest known alert (if any) and the latest known inventory
/// snapshot. Starts with no alert and an all-unstocked inventory.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    alert: Option<Alert>,
    inventory: Inventory,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Replace the stored alert wholesale. Any well-formed decoded alert
    /// is accepted; magnitude and place are not validated here. Returns
    /// whether the stored value changed.
    pub fn apply_alert(&mut self, alert: Alert) -> bool {
        if self.alert.as_ref() == Some(&alert) {
            return false;
        }
        self.alert = Some(alert);
        true
    }

    /// Replace the inventory snapshot wholesale. Partial snapshots are
    /// rejected at decode and never reach this method; every snapshot
    /// applied here is total. Returns whether the stored value changed.
    pub fn apply_inventory(&mut self, snapshot: Inventory) -> bool {
        if self.inventory == snapshot {
            return false;
        }
        self.inventory = snapshot;
        true
    }
}
