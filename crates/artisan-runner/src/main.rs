//! Craft runner entry point.
//!
//! Reads craft requests from stdin as JSON lines, drives the craft action
//! against a bot bridge over HTTP, and writes one JSON report per request
//! to stdout. Logs go to stderr so stdout stays machine-readable.
//!
//! # Architecture
//!
//! ```text
//! stdin --> CraftSession --> HttpBot --> bridge (HTTP) --> game
//!                |
//!                +--> stdout (CraftReport)
//! ```

mod bridge;
mod config;
mod error;
mod runner;

use artisan_craft::CraftSession;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::bridge::HttpBot;
use crate::config::RunnerConfig;
use crate::runner::serve_requests;

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// builds the bridge client and craft session, then serves requests until
/// stdin closes.
///
/// # Errors
///
/// Returns an error if initialization fails or stdin/stdout break.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("artisan-runner starting");

    // Load configuration from environment
    let config = RunnerConfig::from_env()?;
    let craft_config = config.load_craft_config()?;
    let catalog = config.load_catalog()?;
    info!(
        bridge_url = config.bridge.url,
        request_timeout_ms = config.bridge.request_timeout.as_millis(),
        max_retries = config.bridge.max_retries,
        backoff_ms = config.bridge.backoff.as_millis(),
        catalog_dir = ?config.catalog_dir,
        items = catalog.item_count(),
        blocks = catalog.block_count(),
        "configuration loaded"
    );

    let bot = HttpBot::new(&config.bridge)?;
    info!(bridge_url = bot.base_url(), "bridge client ready");

    let mut session = CraftSession::new(bot, catalog, craft_config);
    let craft = session.config();
    info!(
        session_id = %session.id(),
        search_radius = craft.search_radius,
        station_block = craft.station_block,
        station_policy = ?craft.station_policy,
        max_failures_per_item = craft.max_failures_per_item,
        "craft session started"
    );

    let summary = serve_requests(
        &mut session,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;

    info!(
        crafted = summary.crafted,
        failed = summary.failed,
        "artisan-runner shutting down"
    );
    Ok(())
}
