//! Scripted bot shared by the integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Mutex;
use std::time::Duration;

use artisan_craft::{BotControl, BotError, Catalog, Inventory};
use artisan_types::{BlockDef, BlockPos, ItemDef, Recipe, RecipeItem};

/// A call the craft action made against the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FindBlock { block: String, max_distance: u32 },
    Goto(BlockPos),
    RecipesFor { item: String, batch: u32, station: Option<BlockPos> },
    RecipesAll { item: String, station: Option<BlockPos> },
    Inventory,
    Craft { recipe: Recipe, count: u32, station: Option<BlockPos> },
}

/// A bot whose answers are fixed up front and whose calls are recorded.
#[derive(Debug, Default)]
pub struct ScriptedBot {
    pub station: Option<BlockPos>,
    pub find_error: Option<String>,
    pub goto_error: Option<String>,
    pub goto_delay: Option<Duration>,
    pub recipes: Vec<Recipe>,
    pub recipes_error: Option<String>,
    pub all_recipes: Vec<Recipe>,
    pub all_recipes_error: Option<String>,
    pub inventory: Inventory,
    pub inventory_error: Option<String>,
    pub craft_error: Option<String>,
    pub craft_delay: Option<Duration>,
    /// Craft calls that fail before the bot starts succeeding.
    pub transient_craft_failures: Mutex<u32>,
    pub calls: Mutex<Vec<Call>>,
    pub chats: Mutex<Vec<String>>,
}

impl ScriptedBot {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn chats(&self) -> Vec<String> {
        self.chats.lock().unwrap().clone()
    }

    pub fn count_calls(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| matches(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl BotControl for ScriptedBot {
    async fn find_block(
        &self,
        block: &BlockDef,
        max_distance: u32,
    ) -> Result<Option<BlockPos>, BotError> {
        self.record(Call::FindBlock {
            block: block.name.clone(),
            max_distance,
        });
        match &self.find_error {
            Some(message) => Err(BotError::new(message.clone())),
            None => Ok(self.station),
        }
    }

    async fn goto_look_at(&self, position: BlockPos) -> Result<(), BotError> {
        self.record(Call::Goto(position));
        if let Some(delay) = self.goto_delay {
            tokio::time::sleep(delay).await;
        }
        match &self.goto_error {
            Some(message) => Err(BotError::new(message.clone())),
            None => Ok(()),
        }
    }

    async fn recipes_for(
        &self,
        item: &ItemDef,
        batch: u32,
        station: Option<BlockPos>,
    ) -> Result<Vec<Recipe>, BotError> {
        self.record(Call::RecipesFor {
            item: item.name.clone(),
            batch,
            station,
        });
        match &self.recipes_error {
            Some(message) => Err(BotError::new(message.clone())),
            None => Ok(self.recipes.clone()),
        }
    }

    async fn recipes_all(
        &self,
        item: &ItemDef,
        station: Option<BlockPos>,
    ) -> Result<Vec<Recipe>, BotError> {
        self.record(Call::RecipesAll {
            item: item.name.clone(),
            station,
        });
        match &self.all_recipes_error {
            Some(message) => Err(BotError::new(message.clone())),
            None => Ok(self.all_recipes.clone()),
        }
    }

    async fn inventory(&self) -> Result<Inventory, BotError> {
        self.record(Call::Inventory);
        match &self.inventory_error {
            Some(message) => Err(BotError::new(message.clone())),
            None => Ok(self.inventory.clone()),
        }
    }

    async fn craft(
        &self,
        recipe: &Recipe,
        count: u32,
        station: Option<BlockPos>,
    ) -> Result<(), BotError> {
        self.record(Call::Craft {
            recipe: recipe.clone(),
            count,
            station,
        });
        if let Some(delay) = self.craft_delay {
            tokio::time::sleep(delay).await;
        }
        {
            let mut remaining = self.transient_craft_failures.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(BotError::new("transient failure"));
            }
        }
        match &self.craft_error {
            Some(message) => Err(BotError::new(message.clone())),
            None => Ok(()),
        }
    }

    async fn chat(&self, message: &str) {
        self.chats.lock().unwrap().push(message.to_owned());
    }
}

pub fn item_id(catalog: &Catalog, name: &str) -> u32 {
    catalog.item_by_name(name).unwrap().id
}

/// A recipe producing `count` of `result` from `(ingredient, units)` pairs.
pub fn recipe(
    catalog: &Catalog,
    result: &str,
    count: u32,
    ingredients: &[(&str, u32)],
    requires_table: bool,
) -> Recipe {
    Recipe {
        result: RecipeItem::new(item_id(catalog, result), result, count),
        ingredients: ingredients
            .iter()
            .map(|&(name, units)| RecipeItem::new(item_id(catalog, name), name, units))
            .collect(),
        requires_table,
    }
}

/// An inventory holding `(item, units)` pairs.
pub fn inventory(entries: &[(&str, u32)]) -> Inventory {
    entries
        .iter()
        .map(|&(name, units)| (name.to_owned(), units))
        .collect()
}

pub fn planks_recipe(catalog: &Catalog) -> Recipe {
    recipe(catalog, "oak_planks", 4, &[("oak_log", 1)], false)
}

pub fn pickaxe_recipe(catalog: &Catalog) -> Recipe {
    recipe(
        catalog,
        "diamond_pickaxe",
        1,
        &[("diamond", 3), ("stick", 2)],
        true,
    )
}
