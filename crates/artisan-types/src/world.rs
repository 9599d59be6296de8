//! Item, block, and position types shared between the craft action and the
//! bot bridge.
//!
//! Item and block definitions mirror the entries of the static game data
//! tables: a numeric id, a machine name (`oak_planks`), and a display name
//! (`Oak Planks`). Field names follow the `camelCase` layout of those tables
//! on the wire so the same structs can be read straight from the data files.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Default stack size for items whose data entry omits it.
const DEFAULT_STACK_SIZE: u32 = 64;

const fn default_stack_size() -> u32 {
    DEFAULT_STACK_SIZE
}

/// A static item definition, looked up by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ItemDef {
    /// Numeric item id used by the recipe service.
    pub id: u32,
    /// Machine name, e.g. `oak_planks`.
    pub name: String,
    /// Human-readable name, e.g. `Oak Planks`.
    pub display_name: String,
    /// Maximum units per inventory slot.
    #[serde(default = "default_stack_size")]
    pub stack_size: u32,
}

/// A static block definition, looked up by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct BlockDef {
    /// Numeric block id used by the spatial search.
    pub id: u32,
    /// Machine name, e.g. `crafting_table`.
    pub name: String,
    /// Human-readable name, e.g. `Crafting Table`.
    pub display_name: String,
}

/// An integer block position in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BlockPos {
    /// East/west coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// North/south coordinate.
    pub z: i32,
}

impl BlockPos {
    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl core::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_def_reads_data_table_layout() {
        let item: Result<ItemDef, _> = serde_json::from_str(
            r#"{"id": 23, "name": "oak_planks", "displayName": "Oak Planks", "stackSize": 64}"#,
        );
        let item = item.ok();
        assert_eq!(item.as_ref().map(|i| i.id), Some(23));
        assert_eq!(item.as_ref().map(|i| i.display_name.as_str()), Some("Oak Planks"));
    }

    #[test]
    fn missing_stack_size_defaults() {
        let item: Result<ItemDef, _> =
            serde_json::from_str(r#"{"id": 1, "name": "stick", "displayName": "Stick"}"#);
        assert_eq!(item.ok().map(|i| i.stack_size), Some(DEFAULT_STACK_SIZE));
    }

    #[test]
    fn block_pos_display() {
        assert_eq!(BlockPos::new(1, -2, 3).to_string(), "(1, -2, 3)");
    }
}
