//! The bot-control surface the craft action drives.
//!
//! The game connection, pathfinder, and crafting window all live outside
//! this crate. [`BotControl`] is the seam: the runner implements it over an
//! HTTP bridge, tests implement it with scripted fakes.
//!
//! Methods return `Send` futures so an implementation can be driven from a
//! multi-threaded runtime. Generic callers (`B: BotControl`) avoid the
//! dyn-compatibility limits of async trait methods.

use std::collections::BTreeMap;
use std::future::Future;

use artisan_types::{BlockDef, BlockPos, ItemDef, Recipe};

use crate::error::BotError;

/// Item name -> units held.
pub type Inventory = BTreeMap<String, u32>;

/// Operations the craft action needs from the bot.
pub trait BotControl {
    /// Find the nearest block of the given type within `max_distance`
    /// blocks of the bot. `Ok(None)` means nothing was in range.
    fn find_block(
        &self,
        block: &BlockDef,
        max_distance: u32,
    ) -> impl Future<Output = Result<Option<BlockPos>, BotError>> + Send;

    /// Move until the bot can look at the block at `position`.
    fn goto_look_at(&self, position: BlockPos)
    -> impl Future<Output = Result<(), BotError>> + Send;

    /// Recipes for `item` that the bot can execute `batch` times with its
    /// current inventory, given the station (or none).
    fn recipes_for(
        &self,
        item: &ItemDef,
        batch: u32,
        station: Option<BlockPos>,
    ) -> impl Future<Output = Result<Vec<Recipe>, BotError>> + Send;

    /// Every known recipe for `item`, regardless of inventory and station.
    fn recipes_all(
        &self,
        item: &ItemDef,
        station: Option<BlockPos>,
    ) -> impl Future<Output = Result<Vec<Recipe>, BotError>> + Send;

    /// The bot's current inventory.
    fn inventory(&self) -> impl Future<Output = Result<Inventory, BotError>> + Send;

    /// Execute `recipe` `count` times at the station (or in the inventory
    /// grid when `station` is `None`).
    fn craft(
        &self,
        recipe: &Recipe,
        count: u32,
        station: Option<BlockPos>,
    ) -> impl Future<Output = Result<(), BotError>> + Send;

    /// Send a chat message. Delivery is not guaranteed and failures are not
    /// reported.
    fn chat(&self, message: &str) -> impl Future<Output = ()> + Send;
}
