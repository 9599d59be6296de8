//! Chat feedback for the craft action.
//!
//! When the recipe service returns nothing usable, the action explains why
//! in chat: the item has no recipe at all, every recipe needs a station the
//! bot is not at, or the bot is short of ingredients. [`diagnose`] works this
//! out from the full recipe list and the inventory; the remaining functions
//! format the fixed chat lines.

use std::collections::BTreeSet;

use artisan_types::{MissingIngredient, Recipe};

use crate::bot::Inventory;
use crate::config::RECIPE_BATCH;

/// Why no usable recipe was returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnosis {
    /// The item has no recipe at all.
    NotCraftable,
    /// Recipes exist, but all of them need a station and none is in use.
    NeedsStation,
    /// The closest recipe is short of these ingredients.
    Missing(Vec<MissingIngredient>),
}

/// Work out why no recipe was usable.
///
/// `recipes` is every known recipe for the item. When `station_present` is
/// false, station-only recipes are not considered. Among the remaining
/// recipes, the one with the fewest missing units for a single execution
/// wins; ties keep the earlier recipe. Ingredients are matched against the
/// inventory by name.
pub fn diagnose(recipes: &[Recipe], inventory: &Inventory, station_present: bool) -> Diagnosis {
    if recipes.is_empty() {
        return Diagnosis::NotCraftable;
    }

    let mut best: Option<(u32, Vec<MissingIngredient>)> = None;
    for recipe in recipes
        .iter()
        .filter(|r| station_present || !r.requires_table)
    {
        let missing = shortfall(recipe, inventory);
        let total = missing
            .iter()
            .fold(0_u32, |acc, m| acc.saturating_add(m.count));
        if best.as_ref().is_none_or(|(best_total, _)| total < *best_total) {
            best = Some((total, missing));
        }
    }

    match best {
        Some((_, missing)) => Diagnosis::Missing(missing),
        None => Diagnosis::NeedsStation,
    }
}

/// Ingredients short for one execution of `recipe`, in recipe order.
fn shortfall(recipe: &Recipe, inventory: &Inventory) -> Vec<MissingIngredient> {
    let mut seen = BTreeSet::new();
    let mut missing = Vec::new();
    for ingredient in &recipe.ingredients {
        if !seen.insert(ingredient.name.as_str()) {
            continue;
        }
        let needed = recipe
            .ingredient_count(&ingredient.name)
            .saturating_mul(RECIPE_BATCH);
        let held = inventory.get(&ingredient.name).copied().unwrap_or(0);
        let short = needed.saturating_sub(held);
        if short > 0 {
            missing.push(MissingIngredient {
                item: ingredient.name.clone(),
                count: short,
            });
        }
    }
    missing
}

/// Human-readable station label, e.g. `crafting table`.
pub fn station_label(display_name: &str) -> String {
    display_name.to_lowercase()
}

/// Chat line when no station is in range and the action continues without one.
pub fn crafting_without_station(station: &str) -> String {
    format!("Craft without a {station}")
}

/// Chat line once a recipe has been selected.
pub fn can_make(item: &str) -> String {
    format!("I can make {item}")
}

/// Chat line after a successful craft.
pub fn crafted(item: &str, count: u32) -> String {
    format!("I crafted {item} {count} times.")
}

/// Chat line after a failed craft call.
pub fn craft_failed(item: &str, count: u32, error: &str) -> String {
    format!("Failed to craft {item} {count} times. Error: {error}")
}

/// Chat line when a station is required but none is in range.
pub fn no_station(item: &str, station: &str) -> String {
    format!("I cannot make {item} without a {station}")
}

/// Chat line explaining a [`Diagnosis`].
pub fn explain(item: &str, station: &str, diagnosis: &Diagnosis) -> String {
    match diagnosis {
        Diagnosis::NotCraftable => format!("I cannot make {item}"),
        Diagnosis::NeedsStation => no_station(item, station),
        Diagnosis::Missing(missing) if missing.is_empty() => format!("I cannot make {item}"),
        Diagnosis::Missing(missing) => {
            let needs: Vec<String> = missing
                .iter()
                .map(|m| format!("{} more {}", m.count, m.item))
                .collect();
            format!("I cannot make {item} because I need: {}", needs.join(", "))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use artisan_types::RecipeItem;

    use super::*;

    fn recipe(result: &str, ingredients: &[(u32, &str, u32)], requires_table: bool) -> Recipe {
        Recipe {
            result: RecipeItem::new(900, result, 1),
            ingredients: ingredients
                .iter()
                .map(|&(id, name, count)| RecipeItem::new(id, name, count))
                .collect(),
            requires_table,
        }
    }

    fn inventory(entries: &[(&str, u32)]) -> Inventory {
        entries
            .iter()
            .map(|&(name, count)| (name.to_owned(), count))
            .collect()
    }

    #[test]
    fn no_recipes_is_not_craftable() {
        let diagnosis = diagnose(&[], &Inventory::new(), true);
        assert_eq!(diagnosis, Diagnosis::NotCraftable);
        assert_eq!(
            explain("bedrock", "crafting table", &diagnosis),
            "I cannot make bedrock"
        );
    }

    #[test]
    fn station_only_recipes_without_station_need_station() {
        let recipes = [recipe(
            "diamond_pickaxe",
            &[(764, "diamond", 3), (807, "stick", 2)],
            true,
        )];
        let diagnosis = diagnose(&recipes, &Inventory::new(), false);
        assert_eq!(diagnosis, Diagnosis::NeedsStation);
        assert_eq!(
            explain("diamond_pickaxe", "crafting table", &diagnosis),
            "I cannot make diamond_pickaxe without a crafting table"
        );
    }

    #[test]
    fn picks_recipe_with_fewest_missing_units() {
        let recipes = [
            recipe("stick", &[(23, "oak_planks", 2)], false),
            recipe("stick", &[(24, "spruce_planks", 2)], false),
        ];
        let diagnosis = diagnose(&recipes, &inventory(&[("spruce_planks", 1)]), false);
        assert_eq!(
            diagnosis,
            Diagnosis::Missing(vec![MissingIngredient {
                item: String::from("spruce_planks"),
                count: 1,
            }])
        );
        assert_eq!(
            explain("stick", "crafting table", &diagnosis),
            "I cannot make stick because I need: 1 more spruce_planks"
        );
    }

    #[test]
    fn duplicate_ingredient_entries_are_merged() {
        let recipes = [recipe(
            "wooden_pickaxe",
            &[(23, "oak_planks", 1), (807, "stick", 2), (23, "oak_planks", 2)],
            true,
        )];
        let diagnosis = diagnose(&recipes, &inventory(&[("oak_planks", 1)]), true);
        assert_eq!(
            diagnosis,
            Diagnosis::Missing(vec![
                MissingIngredient {
                    item: String::from("oak_planks"),
                    count: 2,
                },
                MissingIngredient {
                    item: String::from("stick"),
                    count: 2,
                },
            ])
        );
    }

    #[test]
    fn game_ids_do_not_affect_names() {
        // 23 is oak_planks in the game data but a different item in any
        // local table; only the name from the bridge is used.
        let recipes = [recipe("stick", &[(23, "oak_planks", 2)], false)];
        let diagnosis = diagnose(&recipes, &Inventory::new(), false);
        assert_eq!(
            diagnosis,
            Diagnosis::Missing(vec![MissingIngredient {
                item: String::from("oak_planks"),
                count: 2,
            }])
        );
    }

    #[test]
    fn fixed_chat_lines() {
        assert_eq!(crafted("oak_planks", 2), "I crafted oak_planks 2 times.");
        assert_eq!(can_make("torch"), "I can make torch");
        assert_eq!(
            craft_failed("torch", 4, "no coal"),
            "Failed to craft torch 4 times. Error: no coal"
        );
        assert_eq!(
            crafting_without_station("crafting table"),
            "Craft without a crafting table"
        );
        assert_eq!(station_label("Crafting Table"), "crafting table");
    }
}
