//! Static item and block tables.
//!
//! The craft action resolves item names and the station block name against
//! a [`Catalog`]. The built-in table covers the wood, stone, iron and
//! diamond tiers; a full table can be loaded from `items.json` and
//! `blocks.json` files in the usual game data layout
//! (`[{"id": .., "name": .., "displayName": .., "stackSize": ..}]`).
//!
//! Built-in ids are only stable within the built-in table. Everything
//! exchanged with the bridge (requests, recipes, inventory) is matched by
//! name, so a live server does not depend on them.

use std::collections::BTreeMap;
use std::path::Path;

use artisan_types::{BlockDef, ItemDef};

/// Errors that can occur when loading a catalog from disk.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read a data file.
    #[error("failed to read {file}: {source}")]
    Io {
        /// The file that could not be read.
        file: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A data file is not a valid definition array.
    #[error("failed to parse {file}: {source}")]
    Json {
        /// The file that could not be parsed.
        file: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Built-in items: (name, display name, stack size).
const BUILTIN_ITEMS: &[(&str, &str, u32)] = &[
    ("oak_log", "Oak Log", 64),
    ("spruce_log", "Spruce Log", 64),
    ("birch_log", "Birch Log", 64),
    ("oak_planks", "Oak Planks", 64),
    ("spruce_planks", "Spruce Planks", 64),
    ("birch_planks", "Birch Planks", 64),
    ("stick", "Stick", 64),
    ("crafting_table", "Crafting Table", 64),
    ("chest", "Chest", 64),
    ("ladder", "Ladder", 64),
    ("bowl", "Bowl", 64),
    ("wooden_pickaxe", "Wooden Pickaxe", 1),
    ("wooden_axe", "Wooden Axe", 1),
    ("wooden_shovel", "Wooden Shovel", 1),
    ("wooden_sword", "Wooden Sword", 1),
    ("cobblestone", "Cobblestone", 64),
    ("stone_pickaxe", "Stone Pickaxe", 1),
    ("stone_axe", "Stone Axe", 1),
    ("stone_shovel", "Stone Shovel", 1),
    ("stone_sword", "Stone Sword", 1),
    ("furnace", "Furnace", 64),
    ("coal", "Coal", 64),
    ("torch", "Torch", 64),
    ("raw_iron", "Raw Iron", 64),
    ("iron_ingot", "Iron Ingot", 64),
    ("iron_pickaxe", "Iron Pickaxe", 1),
    ("iron_axe", "Iron Axe", 1),
    ("iron_shovel", "Iron Shovel", 1),
    ("iron_sword", "Iron Sword", 1),
    ("bucket", "Bucket", 16),
    ("shield", "Shield", 1),
    ("diamond", "Diamond", 64),
    ("diamond_pickaxe", "Diamond Pickaxe", 1),
    ("diamond_axe", "Diamond Axe", 1),
    ("diamond_shovel", "Diamond Shovel", 1),
    ("diamond_sword", "Diamond Sword", 1),
    ("string", "String", 64),
    ("bow", "Bow", 1),
    ("flint", "Flint", 64),
    ("feather", "Feather", 64),
    ("arrow", "Arrow", 64),
];

/// Built-in blocks: (name, display name).
const BUILTIN_BLOCKS: &[(&str, &str)] = &[
    ("stone", "Stone"),
    ("cobblestone", "Cobblestone"),
    ("oak_log", "Oak Log"),
    ("oak_planks", "Oak Planks"),
    ("crafting_table", "Crafting Table"),
    ("furnace", "Furnace"),
    ("chest", "Chest"),
];

/// Name-indexed item and block tables.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items_by_name: BTreeMap<String, ItemDef>,
    blocks_by_name: BTreeMap<String, BlockDef>,
}

impl Catalog {
    /// Build a catalog from explicit definitions.
    ///
    /// Later definitions with a duplicate name replace earlier ones.
    pub fn from_defs(items: Vec<ItemDef>, blocks: Vec<BlockDef>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            catalog.items_by_name.insert(item.name.clone(), item);
        }
        for block in blocks {
            catalog.blocks_by_name.insert(block.name.clone(), block);
        }
        catalog
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        let items = (1_u32..)
            .zip(BUILTIN_ITEMS)
            .map(|(id, &(name, display_name, stack_size))| ItemDef {
                id,
                name: name.to_owned(),
                display_name: display_name.to_owned(),
                stack_size,
            })
            .collect();
        let blocks = (1_u32..)
            .zip(BUILTIN_BLOCKS)
            .map(|(id, &(name, display_name))| BlockDef {
                id,
                name: name.to_owned(),
                display_name: display_name.to_owned(),
            })
            .collect();
        Self::from_defs(items, blocks)
    }

    /// Parse item and block definition arrays.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if either document is not a valid
    /// definition array.
    pub fn from_json(items_json: &str, blocks_json: &str) -> Result<Self, CatalogError> {
        let items: Vec<ItemDef> =
            serde_json::from_str(items_json).map_err(|source| CatalogError::Json {
                file: String::from("items.json"),
                source,
            })?;
        let blocks: Vec<BlockDef> =
            serde_json::from_str(blocks_json).map_err(|source| CatalogError::Json {
                file: String::from("blocks.json"),
                source,
            })?;
        Ok(Self::from_defs(items, blocks))
    }

    /// Load `items.json` and `blocks.json` from a directory.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if a file cannot be read, or
    /// [`CatalogError::Json`] if it cannot be parsed.
    pub fn from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let read = |file: &str| {
            std::fs::read_to_string(dir.join(file)).map_err(|source| CatalogError::Io {
                file: dir.join(file).display().to_string(),
                source,
            })
        };
        let items = read("items.json")?;
        let blocks = read("blocks.json")?;
        Self::from_json(&items, &blocks)
    }

    /// Look up an item by machine name.
    pub fn item_by_name(&self, name: &str) -> Option<&ItemDef> {
        self.items_by_name.get(name)
    }

    /// Look up a block by machine name.
    pub fn block_by_name(&self, name: &str) -> Option<&BlockDef> {
        self.blocks_by_name.get(name)
    }

    /// Number of items in the table.
    pub fn item_count(&self) -> usize {
        self.items_by_name.len()
    }

    /// Number of blocks in the table.
    pub fn block_count(&self) -> usize {
        self.blocks_by_name.len()
    }
}
