//! HTTP implementation of [`BotControl`].
//!
//! [`HttpBot`] talks to a bridge server that owns the actual game
//! connection. Every operation is a JSON `POST` to a fixed path, answered
//! with an envelope:
//!
//! ```json
//! {"ok": true, "data": ...}
//! {"ok": false, "error": "why the bot refused"}
//! ```
//!
//! Connection failures and 5xx responses are retried with exponential
//! backoff (`backoff * 2^attempt`). Timeouts, 4xx responses and `ok: false`
//! envelopes are final: the bridge may already have acted on the request.

use std::time::Duration;

use artisan_craft::{BotControl, BotError, Inventory};
use artisan_types::{BlockDef, BlockPos, ItemDef, Recipe};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::BridgeConfig;
use crate::error::RunnerError;

/// Bot reached through the HTTP bridge.
#[derive(Debug, Clone)]
pub struct HttpBot {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    backoff: Duration,
}

/// Response body shared by every bridge endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

/// Name and id of an item or block, as sent to the bridge.
#[derive(Debug, Serialize)]
struct Named<'a> {
    id: u32,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct FindBlockBody<'a> {
    block: Named<'a>,
    max_distance: u32,
}

#[derive(Debug, Serialize)]
struct GotoBody {
    position: BlockPos,
}

#[derive(Debug, Serialize)]
struct RecipesBody<'a> {
    item: Named<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    batch: Option<u32>,
    station: Option<BlockPos>,
}

#[derive(Debug, Serialize)]
struct CraftBody<'a> {
    recipe: &'a Recipe,
    count: u32,
    station: Option<BlockPos>,
}

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct EmptyBody {}

/// Outcome of a single failed attempt.
enum AttemptError {
    /// Worth trying again.
    Transient(String),
    /// Retrying could repeat a side effect or cannot help.
    Final(String),
}

impl HttpBot {
    /// Build a client for the bridge described by `config`.
    pub fn new(config: &BridgeConfig) -> Result<Self, RunnerError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RunnerError::Bridge(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_owned(),
            max_retries: config.max_retries.max(1),
            backoff: config.backoff,
        })
    }

    /// The bridge base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` to `path` and return the envelope's `data`.
    async fn call<Req, Resp>(&self, path: &str, body: &Req) -> Result<Option<Resp>, BotError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let mut last_error = String::new();

        for attempt in 0..self.max_retries {
            match self.attempt(&url, body).await {
                Ok(data) => return Ok(data),
                Err(AttemptError::Final(message)) => {
                    debug!(path, attempt, error = %message, "bridge request failed");
                    return Err(BotError::new(message));
                }
                Err(AttemptError::Transient(message)) => {
                    warn!(
                        path,
                        attempt,
                        max_retries = self.max_retries,
                        error = %message,
                        "bridge request failed, retrying"
                    );
                    last_error = message;
                }
            }

            if attempt.saturating_add(1) < self.max_retries {
                let delay = self.backoff.saturating_mul(2_u32.saturating_pow(attempt));
                tokio::time::sleep(delay).await;
            }
        }

        Err(BotError::new(format!(
            "{path} failed after {} attempts: {last_error}",
            self.max_retries
        )))
    }

    async fn attempt<Req, Resp>(&self, url: &str, body: &Req) -> Result<Option<Resp>, AttemptError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let response = self.client.post(url).json(body).send().await.map_err(|e| {
            if e.is_timeout() {
                AttemptError::Final(format!("bridge request timed out: {e}"))
            } else {
                AttemptError::Transient(format!("bridge request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            let message = format!("bridge returned {status}: {error_body}");
            return Err(if status.is_server_error() {
                AttemptError::Transient(message)
            } else {
                AttemptError::Final(message)
            });
        }

        let envelope: Envelope<Resp> = response
            .json()
            .await
            .map_err(|e| AttemptError::Final(format!("bridge response parse failed: {e}")))?;

        if envelope.ok {
            Ok(envelope.data)
        } else {
            Err(AttemptError::Final(
                envelope
                    .error
                    .unwrap_or_else(|| "bridge reported an unspecified error".to_owned()),
            ))
        }
    }
}

impl BotControl for HttpBot {
    async fn find_block(
        &self,
        block: &BlockDef,
        max_distance: u32,
    ) -> Result<Option<BlockPos>, BotError> {
        let body = FindBlockBody {
            block: Named {
                id: block.id,
                name: &block.name,
            },
            max_distance,
        };
        self.call("/find_block", &body).await
    }

    async fn goto_look_at(&self, position: BlockPos) -> Result<(), BotError> {
        self.call::<_, serde_json::Value>("/goto", &GotoBody { position })
            .await
            .map(|_| ())
    }

    async fn recipes_for(
        &self,
        item: &ItemDef,
        batch: u32,
        station: Option<BlockPos>,
    ) -> Result<Vec<Recipe>, BotError> {
        let body = RecipesBody {
            item: Named {
                id: item.id,
                name: &item.name,
            },
            batch: Some(batch),
            station,
        };
        Ok(self.call("/recipes", &body).await?.unwrap_or_default())
    }

    async fn recipes_all(
        &self,
        item: &ItemDef,
        station: Option<BlockPos>,
    ) -> Result<Vec<Recipe>, BotError> {
        let body = RecipesBody {
            item: Named {
                id: item.id,
                name: &item.name,
            },
            batch: None,
            station,
        };
        Ok(self.call("/recipes_all", &body).await?.unwrap_or_default())
    }

    async fn inventory(&self) -> Result<Inventory, BotError> {
        Ok(self
            .call("/inventory", &EmptyBody {})
            .await?
            .unwrap_or_default())
    }

    async fn craft(
        &self,
        recipe: &Recipe,
        count: u32,
        station: Option<BlockPos>,
    ) -> Result<(), BotError> {
        let body = CraftBody {
            recipe,
            count,
            station,
        };
        self.call::<_, serde_json::Value>("/craft", &body)
            .await
            .map(|_| ())
    }

    async fn chat(&self, message: &str) {
        if let Err(e) = self
            .call::<_, serde_json::Value>("/chat", &ChatBody { message })
            .await
        {
            warn!(error = %e, chat = message, "chat delivery failed");
        }
    }
}
