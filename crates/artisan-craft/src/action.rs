//! The craft action.
//!
//! One call runs a fixed sequence against the bot:
//! 1. Resolve the item name in the catalog
//! 2. Search for the nearest crafting station within the configured radius
//! 3. Walk to the station, or apply the [`StationPolicy`] when none is found
//! 4. Ask the recipe service for recipes the bot can execute once
//! 5. Execute the first eligible recipe `count` times
//!
//! Every step reports in chat for whoever is watching the game, and every
//! failure is also returned as a typed [`CraftError`].

use std::future::Future;
use std::time::Duration;

use artisan_types::{BlockDef, BlockPos, CraftOutcome, ItemDef, RequestId};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::bot::BotControl;
use crate::catalog::Catalog;
use crate::config::{CraftConfig, RECIPE_BATCH, StationPolicy};
use crate::error::{BotError, CraftError};
use crate::feedback::{self, Diagnosis};
use crate::validation::CraftRequest;

/// Everything the craft action needs, borrowed from its owner.
#[derive(Debug)]
pub struct CraftAction<'a, B> {
    /// The bot to drive.
    pub bot: &'a B,
    /// Item and block tables.
    pub catalog: &'a Catalog,
    /// Action tunables.
    pub config: &'a CraftConfig,
}

impl<B> Clone for CraftAction<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for CraftAction<'_, B> {}

/// Craft an item once with a fresh [`RequestId`].
///
/// # Errors
///
/// See [`CraftAction::run`].
pub async fn craft_item<B: BotControl>(
    bot: &B,
    catalog: &Catalog,
    config: &CraftConfig,
    request: &CraftRequest,
) -> Result<CraftOutcome, CraftError> {
    CraftAction {
        bot,
        catalog,
        config,
    }
    .run(RequestId::new(), request)
    .await
}

impl<B: BotControl> CraftAction<'_, B> {
    /// Run the craft action for a validated request.
    ///
    /// # Errors
    ///
    /// - [`CraftError::UnknownItem`] if the name is not in the catalog
    /// - [`CraftError::UnknownStationBlock`] if the configured station block
    ///   is not in the catalog
    /// - [`CraftError::NoStationFound`] if no station is in range and either
    ///   the policy requires one or every recipe needs one
    /// - [`CraftError::Navigation`] if the bot cannot reach the station
    /// - [`CraftError::NoRecipe`] if no recipe can currently produce the item
    /// - [`CraftError::ExecutionFailure`] if the craft call fails
    /// - [`CraftError::Bridge`] if a bot query fails
    pub async fn run(
        &self,
        request_id: RequestId,
        request: &CraftRequest,
    ) -> Result<CraftOutcome, CraftError> {
        let item = self
            .catalog
            .item_by_name(&request.name)
            .ok_or_else(|| CraftError::UnknownItem {
                name: request.name.clone(),
            })?;
        let station_block = self
            .catalog
            .block_by_name(&self.config.station_block)
            .ok_or_else(|| CraftError::UnknownStationBlock {
                name: self.config.station_block.clone(),
            })?;
        let station_label = feedback::station_label(&station_block.display_name);

        debug!(
            request_id = %request_id,
            item = item.name,
            item_id = item.id,
            count = request.count,
            "craft request resolved"
        );

        let station = self.locate_station(request_id, item, station_block, &station_label).await?;

        let recipes = self
            .bot
            .recipes_for(item, RECIPE_BATCH, station)
            .await
            .map_err(|source| CraftError::Bridge {
                query: "recipes_for",
                source,
            })?;
        debug!(
            request_id = %request_id,
            item = item.name,
            candidates = recipes.len(),
            "recipes resolved"
        );

        let Some(recipe) = recipes
            .into_iter()
            .find(|r| station.is_some() || !r.requires_table)
        else {
            return Err(self.explain_no_recipe(request_id, item, station, &station_label).await);
        };

        self.bot.chat(&feedback::can_make(&item.name)).await;

        let craft = self.bot.craft(&recipe, request.count, station);
        match bounded(self.config.craft_timeout(), "craft", craft).await {
            Ok(()) => {
                info!(
                    request_id = %request_id,
                    item = item.name,
                    count = request.count,
                    station = ?station,
                    "item crafted"
                );
                self.bot
                    .chat(&feedback::crafted(&item.name, request.count))
                    .await;
                Ok(CraftOutcome {
                    request_id,
                    item: item.name.clone(),
                    count: request.count,
                    station,
                    recipe,
                    completed_at: Utc::now(),
                })
            }
            Err(source) => {
                warn!(
                    request_id = %request_id,
                    item = item.name,
                    count = request.count,
                    error = %source,
                    "craft call failed"
                );
                self.bot
                    .chat(&feedback::craft_failed(
                        &item.name,
                        request.count,
                        &source.message,
                    ))
                    .await;
                Err(CraftError::ExecutionFailure {
                    item: item.name.clone(),
                    count: request.count,
                    source,
                })
            }
        }
    }

    /// Find the station and walk to it, or apply the station policy.
    ///
    /// Returns the station position, or `None` when crafting continues
    /// without one.
    async fn locate_station(
        &self,
        request_id: RequestId,
        item: &ItemDef,
        station_block: &BlockDef,
        station_label: &str,
    ) -> Result<Option<BlockPos>, CraftError> {
        let found = self
            .bot
            .find_block(station_block, self.config.search_radius)
            .await
            .map_err(|source| CraftError::Bridge {
                query: "find_block",
                source,
            })?;

        let Some(position) = found else {
            return match self.config.station_policy {
                StationPolicy::RequireStation => {
                    info!(
                        request_id = %request_id,
                        item = item.name,
                        station = station_block.name,
                        radius = self.config.search_radius,
                        "no station in range, station required"
                    );
                    self.bot
                        .chat(&feedback::no_station(&item.name, station_label))
                        .await;
                    Err(CraftError::NoStationFound {
                        item: item.name.clone(),
                        station: station_block.name.clone(),
                        radius: self.config.search_radius,
                    })
                }
                StationPolicy::AllowStationless => {
                    info!(
                        request_id = %request_id,
                        item = item.name,
                        station = station_block.name,
                        radius = self.config.search_radius,
                        "no station in range, crafting without one"
                    );
                    self.bot
                        .chat(&feedback::crafting_without_station(station_label))
                        .await;
                    Ok(None)
                }
            };
        };

        debug!(
            request_id = %request_id,
            station = station_block.name,
            position = %position,
            "moving to station"
        );
        let goto = self.bot.goto_look_at(position);
        bounded(self.config.navigation_timeout(), "navigation", goto)
            .await
            .map_err(|source| {
                warn!(
                    request_id = %request_id,
                    station = station_block.name,
                    position = %position,
                    error = %source,
                    "failed to reach station"
                );
                CraftError::Navigation {
                    station: station_block.name.clone(),
                    position,
                    source,
                }
            })?;
        Ok(Some(position))
    }

    /// Explain in chat why no recipe was usable and build the matching error.
    ///
    /// Failures of the diagnostic queries are logged and do not replace the
    /// `NoRecipe` result.
    async fn explain_no_recipe(
        &self,
        request_id: RequestId,
        item: &ItemDef,
        station: Option<BlockPos>,
        station_label: &str,
    ) -> CraftError {
        let diagnosis = match self.bot.recipes_all(item, station).await {
            Ok(all) if all.is_empty() => Diagnosis::NotCraftable,
            Ok(all) => match self.bot.inventory().await {
                Ok(inventory) => {
                    feedback::diagnose(&all, &inventory, station.is_some())
                }
                Err(e) => {
                    warn!(request_id = %request_id, error = %e, "inventory query failed");
                    Diagnosis::Missing(Vec::new())
                }
            },
            Err(e) => {
                warn!(request_id = %request_id, error = %e, "recipes_all query failed");
                Diagnosis::Missing(Vec::new())
            }
        };

        info!(
            request_id = %request_id,
            item = item.name,
            diagnosis = ?diagnosis,
            "no usable recipe"
        );
        self.bot
            .chat(&feedback::explain(&item.name, station_label, &diagnosis))
            .await;

        match diagnosis {
            Diagnosis::NeedsStation => CraftError::NoStationFound {
                item: item.name.clone(),
                station: self.config.station_block.clone(),
                radius: self.config.search_radius,
            },
            Diagnosis::NotCraftable => CraftError::NoRecipe {
                item: item.name.clone(),
                missing: Vec::new(),
            },
            Diagnosis::Missing(missing) => CraftError::NoRecipe {
                item: item.name.clone(),
                missing,
            },
        }
    }
}

/// Await a bot call, failing it if `deadline` passes first.
async fn bounded<F>(deadline: Option<Duration>, what: &str, call: F) -> Result<(), BotError>
where
    F: Future<Output = Result<(), BotError>>,
{
    let Some(deadline) = deadline else {
        return call.await;
    };
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(elapsed) => Err(BotError::new(format!(
            "{what} timed out after {}ms ({elapsed})",
            deadline.as_millis()
        ))),
    }
}
