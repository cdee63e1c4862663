//! Long-term (L3) memory store — the remote collaborator behind
//! `GET /api/memory/L3/{userId}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tempo_core::{Result, TempoError};

/// Where the L3 tier is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum L3Status {
    Empty,
    Loading,
    Loaded,
}

/// What an L3 load attempt produced.
///
/// `Unavailable` collapses to an empty tier as far as the UI is concerned,
/// but the reason is kept for logging. `Discarded` only occurs when stale
/// response discarding is enabled and a newer load already committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(usize),
    Unavailable(String),
    Discarded,
}

/// Fetches the full long-term memory snapshot for a user.
#[async_trait]
pub trait LongTermStore: Send + Sync {
    async fn fetch(&self, user_id: &str) -> Result<Vec<serde_json::Value>>;
}

/// HTTP implementation against the memory API.
pub struct HttpLongTermStore {
    client: Client,
    base_url: String,
}

impl HttpLongTermStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl LongTermStore for HttpLongTermStore {
    async fn fetch(&self, user_id: &str) -> Result<Vec<serde_json::Value>> {
        let url = format!("{}/api/memory/L3/{}", self.base_url, user_id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TempoError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TempoError::Api {
                status: status.as_u16(),
                body,
            });
        }

        // A non-JSON content type means the backend (or a proxy in front of
        // it) answered with something else entirely — treat as unavailable,
        // not as a parse attempt.
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("application/json") {
            return Err(TempoError::ContentType(content_type));
        }

        resp.json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| TempoError::Transport(e.to_string()))
    }
}
