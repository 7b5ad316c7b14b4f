//! JSON bodies exchanged with the backend

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub website_url: String,
    pub tenant_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapeReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Some backend builds report failures under `message` instead of `error`.
    #[serde(default)]
    pub message: Option<String>,
}

impl ScrapeReply {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    pub fn failure_reason(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| match &self.status {
                Some(status) => format!("Scrape failed with status: {}", status),
                None => "Scrape failed".to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub tenant_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatReply {
    /// The answer, if present and non-empty.
    pub fn answer(self) -> Option<String> {
        self.response.filter(|r| !r.is_empty())
    }
}
