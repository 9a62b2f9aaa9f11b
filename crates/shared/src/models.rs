//! Decoded event models for the readyview push protocol.

use serde::{Deserialize, Serialize};

/// The most recent earthquake notification.
///
/// Replaced wholesale on each `earthquake` event, never mutated in place.
/// No clear event exists in the protocol; an alert persists until a fresh
/// push arrives or the process restarts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub magnitude: f64,
    pub place: String,
}

/// A full supply-inventory snapshot over the fixed category set.
///
/// Each `inventory` event is authoritative and total: a payload missing
/// any category key (or carrying an extra one) is rejected as a whole
/// rather than merged with the previous snapshot. Serde enforces this:
/// no field defaults, unknown fields denied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct Inventory {
    pub water: bool,
    pub food: bool,
    pub torch: bool,
    pub shelter: bool,
    pub ppe: bool,
    pub medical: bool,
}

/// The closed set of supply categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Water,
    Food,
    Torch,
    Shelter,
    Ppe,
    Medical,
}

impl Category {
    /// Display order used by the rendering layer's grid.
    pub const ALL: [Category; 6] = [
        Category::Water,
        Category::Food,
        Category::Torch,
        Category::Shelter,
        Category::Ppe,
        Category::Medical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Water => "water",
            Category::Food => "food",
            Category::Torch => "torch",
            Category::Shelter => "shelter",
            Category::Ppe => "ppe",
            Category::Medical => "medical",
        }
    }
}

impl Inventory {
    /// Whether a given category is currently stocked.
    pub fn stocked(&self, category: Category) -> bool {
        match category {
            Category::Water => self.water,
            Category::Food => self.food,
            Category::Torch => self.torch,
            Category::Shelter => self.shelter,
            Category::Ppe => self.ppe,
            Category::Medical => self.medical,
        }
    }

    /// Number of stocked categories, out of [`Category::ALL`].
    pub fn stocked_count(&self) -> usize {
        Category::ALL.iter().filter(|c| self.stocked(**c)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inventory_is_all_unstocked() {
        let inv = Inventory::default();
        for category in Category::ALL {
            assert!(!inv.stocked(category));
        }
        assert_eq!(inv.stocked_count(), 0);
    }

    #[test]
    fn stocked_reads_the_matching_field() {
        let inv = Inventory {
            water: true,
            food: false,
            torch: true,
            shelter: false,
            ppe: false,
            medical: true,
        };
        assert!(inv.stocked(Category::Water));
        assert!(!inv.stocked(Category::Food));
        assert!(inv.stocked(Category::Torch));
        assert!(inv.stocked(Category::Medical));
        assert_eq!(inv.stocked_count(), 3);
    }

    #[test]
    fn category_names_match_wire_keys() {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec!["water", "food", "torch", "shelter", "ppe", "medical"]
        );
    }
}
