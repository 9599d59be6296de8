//! Craft action for a game-playing agent.
//!
//! This crate holds the logic of the "craft an item" action: input
//! validation, item lookup, crafting-station handling, recipe selection,
//! chat feedback, and a per-item failure budget. It performs no I/O of its
//! own; the game is reached through the [`BotControl`] trait.
//!
//! # Modules
//!
//! - [`action`] -- The craft sequence ([`craft_item`], [`CraftAction`])
//! - [`bot`] -- The bot-control seam ([`BotControl`])
//! - [`catalog`] -- Static item and block tables ([`Catalog`])
//! - [`config`] -- Action tunables and station policy ([`CraftConfig`])
//! - [`error`] -- Error types ([`CraftError`], [`BotError`])
//! - [`feedback`] -- Chat lines and no-recipe diagnosis
//! - [`ledger`] -- Per-item failure budget ([`FailureLedger`])
//! - [`session`] -- Action plus budget behind one owner ([`CraftSession`])
//! - [`validation`] -- Request validation ([`CraftRequest`])

pub mod action;
pub mod bot;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feedback;
pub mod ledger;
pub mod session;
pub mod validation;

// Re-export primary types at crate root for convenience.
pub use action::{CraftAction, craft_item};
pub use bot::{BotControl, Inventory};
pub use catalog::{Catalog, CatalogError};
pub use config::{
    ConfigError, CraftConfig, DEFAULT_MAX_FAILURES_PER_ITEM, DEFAULT_SEARCH_RADIUS,
    DEFAULT_STATION_BLOCK, RECIPE_BATCH, StationPolicy,
};
pub use error::{BotError, CraftError};
pub use ledger::FailureLedger;
pub use session::{CraftSession, failure_report};
pub use validation::{CraftRequest, DEFAULT_COUNT};
