//! Outcome and report types for craft requests.
//!
//! A [`CraftOutcome`] is the typed success value returned by the craft
//! action. A [`CraftReport`] is the serializable line the runner emits for
//! every request, success or failure, so callers never have to scrape chat
//! text to learn what happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::RequestId;
use crate::recipe::Recipe;
use crate::world::BlockPos;

/// Category of a failed craft request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CraftFailureKind {
    /// Name or count had the wrong type or an out-of-range value.
    InvalidArgument,
    /// The name is not in the item table.
    UnknownItem,
    /// No crafting station within range and the recipe needs one.
    NoStationFound,
    /// No recipe can currently produce the item.
    NoRecipe,
    /// Moving to the crafting station failed.
    Navigation,
    /// The craft call itself failed.
    ExecutionFailure,
    /// The item has used up its failure budget for this session.
    BudgetExhausted,
    /// The action is misconfigured (e.g. unknown station block).
    Configuration,
    /// The bot bridge could not answer a query.
    Bridge,
}

impl CraftFailureKind {
    /// Stable snake-case label for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::UnknownItem => "unknown_item",
            Self::NoStationFound => "no_station_found",
            Self::NoRecipe => "no_recipe",
            Self::Navigation => "navigation",
            Self::ExecutionFailure => "execution_failure",
            Self::BudgetExhausted => "budget_exhausted",
            Self::Configuration => "configuration",
            Self::Bridge => "bridge",
        }
    }
}

impl core::fmt::Display for CraftFailureKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ingredient the agent is short of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MissingIngredient {
    /// Item name of the ingredient.
    pub item: String,
    /// Additional units needed.
    pub count: u32,
}

/// A successful craft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CraftOutcome {
    /// The request this outcome answers.
    pub request_id: RequestId,
    /// Item name that was crafted.
    pub item: String,
    /// Number of times the recipe was executed.
    pub count: u32,
    /// Station used, if any.
    pub station: Option<BlockPos>,
    /// The recipe that was executed.
    pub recipe: Recipe,
    /// When the craft call returned.
    pub completed_at: DateTime<Utc>,
}

/// Final status of a craft request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ReportStatus {
    /// The item was crafted.
    Crafted {
        /// Station used, if any.
        station: Option<BlockPos>,
        /// Units produced per execution of the recipe.
        units_per_craft: u32,
    },
    /// The request failed.
    Failed {
        /// Failure category.
        kind: CraftFailureKind,
        /// Human-readable error text.
        message: String,
        /// Ingredients the agent is short of, when known.
        missing: Vec<MissingIngredient>,
    },
}

/// One line of runner output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CraftReport {
    /// The request this report answers.
    pub request_id: RequestId,
    /// Requested item, when the name was valid text.
    pub item: Option<String>,
    /// Requested count, when it was valid.
    pub count: Option<u32>,
    /// Final status.
    #[serde(flatten)]
    pub status: ReportStatus,
    /// When the report was produced.
    pub reported_at: DateTime<Utc>,
}

impl CraftReport {
    /// Build a success report from an outcome.
    pub fn crafted(outcome: &CraftOutcome) -> Self {
        Self {
            request_id: outcome.request_id,
            item: Some(outcome.item.clone()),
            count: Some(outcome.count),
            status: ReportStatus::Crafted {
                station: outcome.station,
                units_per_craft: outcome.recipe.result.count,
            },
            reported_at: Utc::now(),
        }
    }

    /// Whether the request succeeded.
    pub const fn is_success(&self) -> bool {
        matches!(self.status, ReportStatus::Crafted { .. })
    }
}
