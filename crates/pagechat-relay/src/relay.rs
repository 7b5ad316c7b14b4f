//! Request handling
//!
//! Handling is split in two steps. [`Relay::prepare`] validates the request
//! and touches the session registry; it runs synchronously, in arrival
//! order, inside the broker. [`BackendCall::execute`] performs the network
//! round trip and may overlap with other callers' calls.

use pagechat_backend::Backend;
use pagechat_session::{SessionId, SessionRegistry, SessionTicket};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::RelayError;
use crate::message::{RelayPayload, RelayRequest, RelayResponse};
use crate::Result;

/// What happens to the current-session pointer when a scrape fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeFailurePolicy {
    /// The failed session stays current; later questions go to a session
    /// the backend never populated.
    #[default]
    Keep,
    /// Restore whichever session was current before, unless a newer
    /// scrape has already replaced the failed one.
    Rollback,
}

pub struct Relay {
    backend: Arc<dyn Backend>,
    registry: SessionRegistry,
    on_scrape_failure: ScrapeFailurePolicy,
}

/// A validated request that still needs its backend round trip.
pub(crate) enum BackendCall {
    Scrape {
        ticket: SessionTicket,
        url: String,
    },
    Ask {
        session_id: SessionId,
        question: String,
    },
}

impl Relay {
    pub fn new(backend: Arc<dyn Backend>, registry: SessionRegistry) -> Self {
        Self {
            backend,
            registry,
            on_scrape_failure: ScrapeFailurePolicy::default(),
        }
    }

    pub fn with_scrape_failure_policy(mut self, policy: ScrapeFailurePolicy) -> Self {
        self.on_scrape_failure = policy;
        self
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Handle one request end to end.
    pub async fn handle(&self, request: RelayRequest) -> RelayResponse {
        let name = request.name();
        let result = match self.prepare(request) {
            Ok(call) => self.execute(call).await,
            Err(err) => Err(err),
        };
        log_outcome(name, &result);
        result.into()
    }

    /// Validate and stamp a request. Never touches the network.
    pub(crate) fn prepare(&self, request: RelayRequest) -> Result<BackendCall> {
        match request {
            RelayRequest::Scrape { url } => {
                let url = url.trim().to_string();
                if url.is_empty() {
                    return Err(RelayError::MissingUrl);
                }
                let ticket = self.registry.open_session(&url);
                Ok(BackendCall::Scrape { ticket, url })
            }
            RelayRequest::AskQuestion { question, url } => {
                if question.trim().is_empty() {
                    return Err(RelayError::MissingQuestion);
                }
                let session_id = self.registry.current_session().ok_or(RelayError::NoSession)?;

                tracing::debug!(session_id = %session_id, url = %url, "Routing question");

                Ok(BackendCall::Ask {
                    session_id,
                    question,
                })
            }
        }
    }

    pub(crate) async fn execute(&self, call: BackendCall) -> Result<RelayPayload> {
        execute(
            Arc::clone(&self.backend),
            self.registry.clone(),
            self.on_scrape_failure,
            call,
        )
        .await
    }

    /// Owned pieces needed to run a call on another task.
    pub(crate) fn parts(&self) -> (Arc<dyn Backend>, SessionRegistry, ScrapeFailurePolicy) {
        (
            Arc::clone(&self.backend),
            self.registry.clone(),
            self.on_scrape_failure,
        )
    }
}

pub(crate) async fn execute(
    backend: Arc<dyn Backend>,
    registry: SessionRegistry,
    on_scrape_failure: ScrapeFailurePolicy,
    call: BackendCall,
) -> Result<RelayPayload> {
    match call {
        BackendCall::Scrape { ticket, url } => {
            match backend.scrape(&url, ticket.id().as_str()).await {
                Ok(()) => Ok(RelayPayload::Scraped),
                Err(err) => {
                    if on_scrape_failure == ScrapeFailurePolicy::Rollback {
                        registry.rollback(&ticket);
                    }
                    Err(err.into())
                }
            }
        }
        BackendCall::Ask {
            session_id,
            question,
        } => {
            let answer = backend.ask(&question, session_id.as_str()).await?;
            Ok(RelayPayload::Answer(answer))
        }
    }
}

pub(crate) fn log_outcome(request: &str, result: &Result<RelayPayload>) {
    match result {
        Ok(_) => tracing::debug!(request = %request, "Relay request succeeded"),
        Err(err) => tracing::warn!(
            request = %request,
            kind = ?err.kind(),
            error = %err,
            "Relay request failed"
        ),
    }
}
