//! Recipe types returned by the recipe service.
//!
//! A recipe produces `result.count` units of one item from a list of
//! ingredients. Recipes that only fit a 3x3 grid need a crafting station;
//! 2x2 recipes can be crafted from the inventory grid.
//!
//! Item ids come from the game and are only meaningful to the bridge that
//! sent them. Names are the key shared with the local item table and the
//! inventory.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An item paired with a unit count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RecipeItem {
    /// Game item id, as reported by the bridge.
    pub item_id: u32,
    /// Item name, e.g. `oak_planks`.
    pub name: String,
    /// Number of units.
    pub count: u32,
}

impl RecipeItem {
    /// Create a recipe entry.
    pub fn new(item_id: u32, name: impl Into<String>, count: u32) -> Self {
        Self {
            item_id,
            name: name.into(),
            count,
        }
    }
}

/// A single candidate recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Recipe {
    /// What one execution of the recipe produces.
    pub result: RecipeItem,
    /// Units consumed per execution, one entry per distinct item.
    pub ingredients: Vec<RecipeItem>,
    /// Whether the recipe needs a crafting station.
    pub requires_table: bool,
}

impl Recipe {
    /// Units of the named item consumed by one execution.
    pub fn ingredient_count(&self, name: &str) -> u32 {
        self.ingredients
            .iter()
            .filter(|i| i.name == name)
            .fold(0_u32, |acc, i| acc.saturating_add(i.count))
    }
}
