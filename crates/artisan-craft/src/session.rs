//! Craft sessions: the craft action plus a failure budget.
//!
//! A [`CraftSession`] owns the bot handle, the catalog, the configuration,
//! and a [`FailureLedger`]. It is the single owner of the ledger, so
//! requests are handled one at a time through `&mut self` and no
//! synchronization is needed. Run one session per bot.

use artisan_types::{
    CraftOutcome, CraftReport, MissingIngredient, ReportStatus, RequestId, SessionId,
};
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::action::CraftAction;
use crate::bot::BotControl;
use crate::catalog::Catalog;
use crate::config::CraftConfig;
use crate::error::CraftError;
use crate::ledger::FailureLedger;
use crate::validation::CraftRequest;

/// A bot, its tables and configuration, and a per-item failure budget.
#[derive(Debug)]
pub struct CraftSession<B> {
    id: SessionId,
    bot: B,
    catalog: Catalog,
    config: CraftConfig,
    ledger: FailureLedger,
}

impl<B: BotControl> CraftSession<B> {
    /// Create a session with an empty failure ledger.
    pub fn new(bot: B, catalog: Catalog, config: CraftConfig) -> Self {
        let ledger = FailureLedger::new(config.max_failures_per_item);
        Self {
            id: SessionId::new(),
            bot,
            catalog,
            config,
            ledger,
        }
    }

    /// This session's identifier.
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// The bot this session drives.
    pub const fn bot(&self) -> &B {
        &self.bot
    }

    /// The session's failure ledger.
    pub const fn ledger(&self) -> &FailureLedger {
        &self.ledger
    }

    /// The session's configuration.
    pub const fn config(&self) -> &CraftConfig {
        &self.config
    }

    /// Craft a validated request, charging failures to the item's budget.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::BudgetExhausted`] without touching the bot if
    /// the item has used up its budget; otherwise any error from
    /// [`CraftAction::run`].
    pub async fn craft(
        &mut self,
        request_id: RequestId,
        request: &CraftRequest,
    ) -> Result<CraftOutcome, CraftError> {
        if self.ledger.is_exhausted(&request.name) {
            let failures = self.ledger.failures(&request.name);
            warn!(
                session_id = %self.id,
                request_id = %request_id,
                item = request.name,
                failures = failures,
                "item failure budget exhausted, refusing request"
            );
            return Err(CraftError::BudgetExhausted {
                item: request.name.clone(),
                failures,
            });
        }

        let action = CraftAction {
            bot: &self.bot,
            catalog: &self.catalog,
            config: &self.config,
        };
        let result = action.run(request_id, request).await;

        match &result {
            Ok(_) => self.ledger.record_success(&request.name),
            Err(e) if e.counts_against_budget() => {
                let failures = self.ledger.record_failure(&request.name);
                info!(
                    session_id = %self.id,
                    request_id = %request_id,
                    item = request.name,
                    kind = %e.kind(),
                    failures = failures,
                    "craft failure charged to item budget"
                );
            }
            Err(_) => {}
        }
        result
    }

    /// Validate a loose JSON request, craft it, and build a report.
    ///
    /// Never fails: every outcome, including malformed input, becomes a
    /// [`CraftReport`].
    pub async fn handle_json(&mut self, request: &Value) -> CraftReport {
        let request_id = RequestId::new();
        let validated = match CraftRequest::from_json(request) {
            Ok(validated) => validated,
            Err(e) => {
                info!(
                    session_id = %self.id,
                    request_id = %request_id,
                    error = %e,
                    "craft request rejected"
                );
                let item = request
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_owned);
                return failure_report(request_id, item, None, &e);
            }
        };

        match self.craft(request_id, &validated).await {
            Ok(outcome) => CraftReport::crafted(&outcome),
            Err(e) => failure_report(
                request_id,
                Some(validated.name.clone()),
                Some(validated.count),
                &e,
            ),
        }
    }
}

/// Build a failure report from a craft error.
pub fn failure_report(
    request_id: RequestId,
    item: Option<String>,
    count: Option<u32>,
    error: &CraftError,
) -> CraftReport {
    let missing: Vec<MissingIngredient> = error.missing().to_vec();
    CraftReport {
        request_id,
        item,
        count,
        status: ReportStatus::Failed {
            kind: error.kind(),
            message: error.to_string(),
            missing,
        },
        reported_at: Utc::now(),
    }
}
