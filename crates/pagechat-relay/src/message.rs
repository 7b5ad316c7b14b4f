//! Typed relay messages

use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// What a UI context may ask of the relay. The session id is never part of
/// a request; the relay resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelayRequest {
    Scrape { url: String },
    AskQuestion { question: String, url: String },
}

impl RelayRequest {
    pub fn scrape(url: impl Into<String>) -> Self {
        RelayRequest::Scrape { url: url.into() }
    }

    pub fn ask(question: impl Into<String>, url: impl Into<String>) -> Self {
        RelayRequest::AskQuestion {
            question: question.into(),
            url: url.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RelayRequest::Scrape { .. } => "scrape",
            RelayRequest::AskQuestion { .. } => "ask_question",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "answer", rename_all = "snake_case")]
pub enum RelayPayload {
    Scraped,
    Answer(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RelayResponse {
    Ok { payload: RelayPayload },
    Err { message: String },
}

impl RelayResponse {
    pub fn scraped() -> Self {
        RelayResponse::Ok {
            payload: RelayPayload::Scraped,
        }
    }

    pub fn answer(answer: impl Into<String>) -> Self {
        RelayResponse::Ok {
            payload: RelayPayload::Answer(answer.into()),
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        RelayResponse::Err {
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, RelayResponse::Ok { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RelayResponse::Err { message } => Some(message),
            RelayResponse::Ok { .. } => None,
        }
    }
}

impl From<RelayError> for RelayResponse {
    fn from(err: RelayError) -> Self {
        RelayResponse::err(err.to_string())
    }
}

impl From<crate::Result<RelayPayload>> for RelayResponse {
    fn from(result: crate::Result<RelayPayload>) -> Self {
        match result {
            Ok(payload) => RelayResponse::Ok { payload },
            Err(err) => err.into(),
        }
    }
}
