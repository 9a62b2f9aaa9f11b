//! The single dispatch loop: owns the state, applies events in arrival
//! order, publishes the selected view.

use tokio::sync::{mpsc, watch};

use crate::channel::ChannelEvent;
use crate::store::AppState;
use crate::view::{select, View};

/// Consumes [`ChannelEvent`]s one at a time and publishes the selected
/// [`View`] through a watch channel after every data event. The watch
/// channel always holds the latest view, so the rendering layer can
/// attach late and still draw the current state.
pub struct Dispatcher {
    state: AppState,
    views: watch::Sender<View>,
}

impl Dispatcher {
    pub fn new(views: watch::Sender<View>) -> Self {
        Self {
            state: AppState::new(),
            views,
        }
    }

    /// Dispatcher plus a view receiver primed with the initial view
    /// (all-unstocked inventory, no alert).
    pub fn with_receiver() -> (Self, watch::Receiver<View>) {
        let (tx, rx) = watch::channel(select(&AppState::new()));
        (Self::new(tx), rx)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply one event. Lifecycle events are diagnostics only; no
    /// business state is cleared on disconnect; the last known data may
    /// still be the best available information. Data events update the
    /// store and re-publish, including redundant ones (idempotent
    /// update, redundant notification).
    pub fn handle(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Connected => tracing::info!("channel up"),
            ChannelEvent::Disconnected => tracing::info!("channel down, keeping last known state"),
            ChannelEvent::Alert(alert) => {
                if !self.state.apply_alert(alert) {
                    tracing::debug!("redundant alert update");
                }
                self.publish();
            }
            ChannelEvent::Inventory(snapshot) => {
                if !self.state.apply_inventory(snapshot) {
                    tracing::debug!("redundant inventory update");
                }
                self.publish();
            }
        }
    }

    fn publish(&self) {
        self.views.send_replace(select(&self.state));
    }

    /// Drain the event queue to completion, strictly in arrival order.
    /// Returns when the channel side drops its sender.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<ChannelEvent>) {
        while let Some(event) = events.recv().await {
            self.handle(event);
        }
        tracing::info!("event queue closed, dispatch loop exiting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readyview_shared::{decode_frame, Alert, Inventory};

    fn alert(magnitude: f64, place: &str) -> ChannelEvent {
        ChannelEvent::Alert(Alert {
            magnitude,
            place: place.to_string(),
        })
    }

    fn inventory(snapshot: Inventory) -> ChannelEvent {
        ChannelEvent::Inventory(snapshot)
    }

    #[test]
    fn initial_view_is_the_empty_inventory() {
        let (_dispatcher, views) = Dispatcher::with_receiver();
        assert_eq!(
            *views.borrow(),
            View::Inventory {
                snapshot: Inventory::default()
            }
        );
    }

    #[test]
    fn inventory_updates_refresh_the_inventory_view() {
        let (mut dispatcher, views) = Dispatcher::with_receiver();
        let snapshot = Inventory {
            water: true,
            food: true,
            ..Inventory::default()
        };
        dispatcher.handle(inventory(snapshot.clone()));
        assert_eq!(*views.borrow(), View::Inventory { snapshot });
    }

    #[test]
    fn an_alert_preempts_the_inventory_view() {
        let (mut dispatcher, views) = Dispatcher::with_receiver();
        dispatcher.handle(inventory(Inventory {
            water: true,
            food: true,
            ..Inventory::default()
        }));
        dispatcher.handle(alert(6.1, "Example City"));
        assert_eq!(
            *views.borrow(),
            View::Alert {
                magnitude: 6.1,
                place: "Example City".to_string(),
            }
        );

        // A later inventory update does not change the view kind
        dispatcher.handle(inventory(Inventory {
            medical: true,
            ..Inventory::default()
        }));
        assert!(matches!(*views.borrow(), View::Alert { .. }));
    }

    #[test]
    fn a_further_alert_updates_the_displayed_alert() {
        let (mut dispatcher, views) = Dispatcher::with_receiver();
        dispatcher.handle(alert(4.8, "North Ridge"));
        dispatcher.handle(alert(6.1, "Example City"));
        assert_eq!(
            *views.borrow(),
            View::Alert {
                magnitude: 6.1,
                place: "Example City".to_string(),
            }
        );
    }

    #[test]
    fn identical_snapshots_applied_twice_leave_state_unchanged() {
        let (mut dispatcher, _views) = Dispatcher::with_receiver();
        let snapshot = Inventory {
            torch: true,
            shelter: true,
            ..Inventory::default()
        };
        dispatcher.handle(inventory(snapshot.clone()));
        let after_first = dispatcher.state().clone();
        dispatcher.handle(inventory(snapshot));
        assert_eq!(dispatcher.state(), &after_first);
    }

    #[test]
    fn lifecycle_events_leave_business_state_alone() {
        let (mut dispatcher, views) = Dispatcher::with_receiver();
        let snapshot = Inventory {
            ppe: true,
            ..Inventory::default()
        };
        dispatcher.handle(inventory(snapshot.clone()));
        dispatcher.handle(ChannelEvent::Disconnected);
        dispatcher.handle(ChannelEvent::Connected);
        assert_eq!(dispatcher.state().inventory(), &snapshot);
        assert_eq!(*views.borrow(), View::Inventory { snapshot });
    }

    #[test]
    fn a_malformed_inventory_frame_never_reaches_the_store() {
        let (mut dispatcher, views) = Dispatcher::with_receiver();
        let snapshot = Inventory {
            water: true,
            ..Inventory::default()
        };
        dispatcher.handle(inventory(snapshot.clone()));

        // medical key absent: decoding fails at the channel boundary, so
        // no event is dispatched and the prior snapshot stands
        let malformed = r#"{"event":"inventory","data":"{\"water\":true,\"food\":false,\"torch\":true,\"shelter\":true,\"ppe\":false}"}"#;
        assert!(decode_frame(malformed).is_err());
        assert_eq!(*views.borrow(), View::Inventory { snapshot });
    }

    // The full scenario from the display's contract: empty grid, then a
    // partial restock, then an alert that preempts everything after it.
    #[tokio::test]
    async fn scenario_restock_then_earthquake() {
        let (dispatcher, mut views) = Dispatcher::with_receiver();
        assert_eq!(views.borrow_and_update().clone(), View::Inventory {
            snapshot: Inventory::default()
        });

        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(dispatcher.run(rx));

        let restock = Inventory {
            water: true,
            food: true,
            ..Inventory::default()
        };
        tx.send(inventory(restock.clone())).unwrap();
        views.changed().await.unwrap();
        assert_eq!(
            views.borrow_and_update().clone(),
            View::Inventory { snapshot: restock }
        );

        tx.send(alert(6.1, "Example City")).unwrap();
        views.changed().await.unwrap();
        assert_eq!(
            views.borrow_and_update().clone(),
            View::Alert {
                magnitude: 6.1,
                place: "Example City".to_string(),
            }
        );

        // The alert still preempts a trailing inventory update
        tx.send(inventory(Inventory {
            medical: true,
            ..Inventory::default()
        }))
        .unwrap();
        views.changed().await.unwrap();
        assert!(matches!(
            views.borrow_and_update().clone(),
            View::Alert { .. }
        ));

        drop(tx);
        task.await.unwrap();
    }
}
