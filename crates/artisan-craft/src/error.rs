//! Error types for the artisan-craft crate.
//!
//! Every way a craft request can fail is a variant of [`CraftError`]. The
//! chat channel only mirrors these for a human watching the game; callers
//! always learn the outcome from the returned `Result`.

use artisan_types::{CraftFailureKind, MissingIngredient};

/// A failure reported by the bot-control surface.
///
/// The bridge owns the details; the action only needs the message text to
/// relay it in chat and in the typed error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BotError {
    /// Description of the failure as reported by the bot.
    pub message: String,
}

impl BotError {
    /// Create a bot error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that can occur while crafting an item.
#[derive(Debug, thiserror::Error)]
pub enum CraftError {
    /// The item name or count had the wrong type or an invalid value.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Which argument was rejected and why.
        reason: String,
    },

    /// The item name is not in the item table.
    #[error("no item named {name}")]
    UnknownItem {
        /// The name that failed to resolve.
        name: String,
    },

    /// No crafting station within range, and the request cannot proceed
    /// without one.
    #[error("no {station} found within {radius} blocks to craft {item}")]
    NoStationFound {
        /// The requested item.
        item: String,
        /// The station block that was searched for.
        station: String,
        /// The search radius in blocks.
        radius: u32,
    },

    /// No recipe can currently produce the item.
    #[error("no recipe available for {item}")]
    NoRecipe {
        /// The requested item.
        item: String,
        /// Ingredients the agent is short of for the closest recipe.
        missing: Vec<MissingIngredient>,
    },

    /// Moving to the crafting station failed.
    #[error("failed to reach {station} at {position}: {source}")]
    Navigation {
        /// The station block name.
        station: String,
        /// The station position.
        position: artisan_types::BlockPos,
        /// The underlying bot failure.
        source: BotError,
    },

    /// The craft call failed after a recipe was selected.
    #[error("failed to craft {item} {count} times: {source}")]
    ExecutionFailure {
        /// The requested item.
        item: String,
        /// The requested count.
        count: u32,
        /// The underlying bot failure.
        source: BotError,
    },

    /// The item has failed too many times in this session.
    #[error("crafting {item} failed {failures} times, budget exhausted")]
    BudgetExhausted {
        /// The requested item.
        item: String,
        /// Failures recorded for the item so far.
        failures: u32,
    },

    /// The station block configured for the action is not in the block table.
    #[error("station block {name} is not in the block table")]
    UnknownStationBlock {
        /// The configured block name.
        name: String,
    },

    /// A bot query other than navigation or crafting failed.
    #[error("bot query {query} failed: {source}")]
    Bridge {
        /// Which query failed (e.g. `find_block`, `recipes_for`).
        query: &'static str,
        /// The underlying bot failure.
        source: BotError,
    },
}

impl CraftError {
    /// The report category for this error.
    pub const fn kind(&self) -> CraftFailureKind {
        match self {
            Self::InvalidArgument { .. } => CraftFailureKind::InvalidArgument,
            Self::UnknownItem { .. } => CraftFailureKind::UnknownItem,
            Self::NoStationFound { .. } => CraftFailureKind::NoStationFound,
            Self::NoRecipe { .. } => CraftFailureKind::NoRecipe,
            Self::Navigation { .. } => CraftFailureKind::Navigation,
            Self::ExecutionFailure { .. } => CraftFailureKind::ExecutionFailure,
            Self::BudgetExhausted { .. } => CraftFailureKind::BudgetExhausted,
            Self::UnknownStationBlock { .. } => CraftFailureKind::Configuration,
            Self::Bridge { .. } => CraftFailureKind::Bridge,
        }
    }

    /// Whether this failure counts against the item's failure budget.
    ///
    /// Only failures that happen after the item resolved and the world was
    /// consulted are charged; bad input and configuration are not.
    pub const fn counts_against_budget(&self) -> bool {
        matches!(
            self,
            Self::NoStationFound { .. }
                | Self::NoRecipe { .. }
                | Self::Navigation { .. }
                | Self::ExecutionFailure { .. }
        )
    }

    /// Ingredients the agent is short of, if this is a [`CraftError::NoRecipe`].
    pub fn missing(&self) -> &[MissingIngredient] {
        match self {
            Self::NoRecipe { missing, .. } => missing,
            _ => &[],
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_variants() {
        let err = CraftError::UnknownItem {
            name: String::from("unobtainium"),
        };
        assert_eq!(err.kind(), CraftFailureKind::UnknownItem);
        assert_eq!(err.to_string(), "no item named unobtainium");

        let err = CraftError::UnknownStationBlock {
            name: String::from("anvil_table"),
        };
        assert_eq!(err.kind(), CraftFailureKind::Configuration);
    }

    #[test]
    fn only_world_failures_count_against_budget() {
        assert!(!CraftError::invalid("count must be >= 1").counts_against_budget());
        assert!(
            !CraftError::UnknownItem {
                name: String::from("x")
            }
            .counts_against_budget()
        );
        assert!(
            CraftError::NoRecipe {
                item: String::from("stick"),
                missing: Vec::new(),
            }
            .counts_against_budget()
        );
        assert!(
            CraftError::ExecutionFailure {
                item: String::from("stick"),
                count: 1,
                source: BotError::new("window closed"),
            }
            .counts_against_budget()
        );
    }

    #[test]
    fn execution_failure_message_includes_source() {
        let err = CraftError::ExecutionFailure {
            item: String::from("stick"),
            count: 4,
            source: BotError::new("missing ingredients"),
        };
        assert_eq!(
            err.to_string(),
            "failed to craft stick 4 times: missing ingredients"
        );
    }
}
