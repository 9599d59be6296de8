//! Shared type definitions for the Artisan craft action.
//!
//! This crate is the single source of truth for the values that cross the
//! boundary between the craft action, the bot bridge, and whatever consumes
//! the runner's reports. Types flow to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for requests and sessions
//! - [`world`] -- Item and block definitions, block positions
//! - [`recipe`] -- Recipes returned by the recipe service
//! - [`report`] -- Craft outcomes, failure kinds, and runner reports

pub mod ids;
pub mod recipe;
pub mod report;
pub mod world;

// Re-export all public types at crate root for convenience.
pub use ids::{RequestId, SessionId};
pub use recipe::{Recipe, RecipeItem};
pub use report::{
    CraftFailureKind, CraftOutcome, CraftReport, MissingIngredient, ReportStatus,
};
pub use world::{BlockDef, BlockPos, ItemDef};
