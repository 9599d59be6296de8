//! Per-item failure budget.
//!
//! A [`FailureLedger`] counts consecutive failures per item for one session.
//! Once an item reaches the budget, further requests for it are refused up
//! front so a caller cannot spin on an item it has no way of making. Items
//! are tracked independently: a failing `diamond_pickaxe` never blocks
//! `oak_planks`.

use std::collections::BTreeMap;

use tracing::debug;

/// Consecutive failure counts keyed by item name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureLedger {
    max_failures: u32,
    failures: BTreeMap<String, u32>,
}

impl FailureLedger {
    /// Create an empty ledger that allows `max_failures` per item.
    pub const fn new(max_failures: u32) -> Self {
        Self {
            max_failures,
            failures: BTreeMap::new(),
        }
    }

    /// Failures an item may accumulate before it is refused.
    pub const fn max_failures(&self) -> u32 {
        self.max_failures
    }

    /// Failures currently recorded for `item`.
    pub fn failures(&self, item: &str) -> u32 {
        self.failures.get(item).copied().unwrap_or(0)
    }

    /// Whether `item` has used up its budget.
    pub fn is_exhausted(&self, item: &str) -> bool {
        self.failures(item) >= self.max_failures
    }

    /// Record a failure for `item` and return the new count.
    pub fn record_failure(&mut self, item: &str) -> u32 {
        let count = self.failures.entry(item.to_owned()).or_insert(0);
        *count = count.saturating_add(1);
        debug!(
            item = item,
            failures = *count,
            max_failures = self.max_failures,
            "failure recorded"
        );
        *count
    }

    /// Forget all failures for `item`.
    pub fn record_success(&mut self, item: &str) {
        self.failures.remove(item);
    }

    /// Items that currently have at least one failure, with their counts.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.failures.iter().map(|(item, count)| (item.as_str(), *count))
    }
}
