//! HTTP client for the scrape/chat service

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::error::BackendError;
use crate::wire::{ChatReply, ChatRequest, ScrapeReply, ScrapeRequest};
use crate::Result;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// The two operations the relay needs from the backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Ask the backend to ingest `url` under `session_id`.
    async fn scrape(&self, url: &str, session_id: &str) -> Result<()>;

    /// Ask `question` against the content ingested for `session_id`.
    async fn ask(&self, question: &str, session_id: &str) -> Result<String>;
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base(base_url)?;

        let mut builder = reqwest::Client::builder().user_agent("pagechat/0.1");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::InvalidUrl(e.to_string()))
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let resp = self.http.post(url).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Protocol(e.to_string()))
    }
}

#[async_trait]
impl Backend for BackendClient {
    async fn scrape(&self, url: &str, session_id: &str) -> Result<()> {
        let body = ScrapeRequest {
            website_url: url.to_string(),
            tenant_id: session_id.to_string(),
        };

        let reply: ScrapeReply = self.post("scrape", &body).await?;
        if reply.is_success() {
            tracing::info!(session_id = %session_id, url = %url, "Backend ingested page");
            Ok(())
        } else {
            let reason = reply.failure_reason();
            tracing::warn!(session_id = %session_id, url = %url, reason = %reason, "Backend rejected scrape");
            Err(BackendError::Rejected(reason))
        }
    }

    async fn ask(&self, question: &str, session_id: &str) -> Result<String> {
        let body = ChatRequest {
            message: question.to_string(),
            tenant_id: session_id.to_string(),
        };

        let reply: ChatReply = self.post("chat", &body).await?;
        let backend_error = reply.error.clone().or_else(|| reply.message.clone());
        match reply.answer() {
            Some(answer) => Ok(answer),
            None => {
                tracing::error!(
                    session_id = %session_id,
                    error = ?backend_error,
                    "Backend returned no answer"
                );
                Err(BackendError::NoAnswer)
            }
        }
    }
}

/// Parse the base endpoint and make sure relative joins append to its path.
fn normalize_base(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    let mut url = Url::parse(trimmed).map_err(|e| BackendError::InvalidUrl(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(BackendError::InvalidUrl(format!(
            "unsupported scheme: {}",
            url.scheme()
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
