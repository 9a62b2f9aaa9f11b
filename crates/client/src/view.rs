//! Presentation selection: which of the two views is active.

use readyview_shared::Inventory;
use serde::Serialize;

use crate::store::AppState;

/// The discriminated view value consumed by the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum View {
    Alert { magnitude: f64, place: String },
    Inventory { snapshot: Inventory },
}

/// Pure selection rule over the current state.
///
/// An active alert always preempts the inventory view, no matter how
/// recently the snapshot changed. There is no downgrade path: the
/// protocol defines no clear event, so once an alert is present only a
/// process restart brings the inventory view back.
pub fn select(state: &AppState) -> View {
    match state.alert() {
        Some(alert) => View::Alert {
            magnitude: alert.magnitude,
            place: alert.place.clone(),
        },
        None => View::Inventory {
            snapshot: state.inventory().clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readyview_shared::Alert;

    #[test]
    fn no_alert_selects_the_inventory_view() {
        let mut state = AppState::new();
        let snapshot = Inventory {
            water: true,
            ppe: true,
            ..Inventory::default()
        };
        state.apply_inventory(snapshot.clone());
        assert_eq!(select(&state), View::Inventory { snapshot });
    }

    #[test]
    fn an_alert_selects_the_alert_view_with_its_exact_fields() {
        let mut state = AppState::new();
        state.apply_inventory(Inventory {
            water: true,
            ..Inventory::default()
        });
        state.apply_alert(Alert {
            magnitude: 6.1,
            place: "Example City".to_string(),
        });
        assert_eq!(
            select(&state),
            View::Alert {
                magnitude: 6.1,
                place: "Example City".to_string(),
            }
        );
    }

    #[test]
    fn views_carry_a_kind_discriminant() {
        let view = select(&AppState::new());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "inventory");

        let mut state = AppState::new();
        state.apply_alert(Alert {
            magnitude: 7.0,
            place: "Coast".to_string(),
        });
        let json = serde_json::to_value(&select(&state)).unwrap();
        assert_eq!(json["kind"], "alert");
        assert_eq!(json["place"], "Coast");
    }
}
