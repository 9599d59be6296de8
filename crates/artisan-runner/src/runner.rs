//! Request loop: JSON lines in, JSON reports out.
//!
//! Each non-blank input line is one craft request. Lines are handled in
//! order on the calling task, so the session's failure ledger has a single
//! owner. Every line produces exactly one report line, including lines that
//! are not valid JSON.

use artisan_craft::{BotControl, CraftError, CraftSession, failure_report};
use artisan_types::{CraftReport, RequestId};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::error::RunnerError;

/// Counters for one run of the request loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Requests that produced a craft.
    pub crafted: u64,
    /// Requests that failed for any reason.
    pub failed: u64,
}

/// Read requests from `input` until EOF, writing one report per request
/// to `output`.
pub async fn serve_requests<B, R, W>(
    session: &mut CraftSession<B>,
    input: R,
    mut output: W,
) -> Result<RunSummary, RunnerError>
where
    B: BotControl,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut summary = RunSummary::default();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let report = match serde_json::from_str::<serde_json::Value>(line) {
            Ok(request) => session.handle_json(&request).await,
            Err(e) => {
                warn!(error = %e, "malformed craft request");
                malformed_report(&e)
            }
        };

        if report.is_success() {
            summary.crafted = summary.crafted.saturating_add(1);
        } else {
            summary.failed = summary.failed.saturating_add(1);
        }

        let mut encoded = serde_json::to_string(&report)?;
        encoded.push('\n');
        output.write_all(encoded.as_bytes()).await?;
        output.flush().await?;
    }

    let ledger = session.ledger();
    for (item, failures) in ledger.entries() {
        info!(
            session_id = %session.id(),
            item,
            failures,
            max_failures = ledger.max_failures(),
            exhausted = ledger.is_exhausted(item),
            "item has outstanding failures"
        );
    }
    info!(
        session_id = %session.id(),
        crafted = summary.crafted,
        failed = summary.failed,
        "input closed"
    );
    Ok(summary)
}

/// Report for a line that is not a JSON document.
fn malformed_report(error: &serde_json::Error) -> CraftReport {
    let error = CraftError::InvalidArgument {
        reason: format!("malformed request: {error}"),
    };
    failure_report(RequestId::new(), None, None, &error)
}
