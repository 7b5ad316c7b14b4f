//! Relay error types

use pagechat_backend::BackendError;
use serde::Serialize;
use thiserror::Error;

/// Coarse error classes reported to the developer console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Network unreachable, non-2xx status, relay gone
    Transport,
    /// Malformed or unexpected payload shape
    Protocol,
    /// Empty question, empty URL, unparseable request
    UserInput,
    /// No active session
    SessionState,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("Missing question")]
    MissingQuestion,

    #[error("Missing URL")]
    MissingUrl,

    #[error("tenantId is not defined. Please scrape a website first.")]
    NoSession,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Relay is not running")]
    Unavailable,
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::MissingQuestion
            | RelayError::MissingUrl
            | RelayError::InvalidRequest(_) => ErrorKind::UserInput,
            RelayError::NoSession => ErrorKind::SessionState,
            RelayError::Backend(e) if e.is_transport() => ErrorKind::Transport,
            RelayError::Backend(_) => ErrorKind::Protocol,
            RelayError::Unavailable => ErrorKind::Transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy() {
        assert_eq!(RelayError::MissingQuestion.kind(), ErrorKind::UserInput);
        assert_eq!(RelayError::NoSession.kind(), ErrorKind::SessionState);
        assert_eq!(
            RelayError::from(BackendError::Status(503)).kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            RelayError::from(BackendError::Protocol("eof".into())).kind(),
            ErrorKind::Protocol
        );
        assert_eq!(
            RelayError::from(BackendError::NoAnswer).kind(),
            ErrorKind::Protocol
        );
    }

    #[test]
    fn test_backend_message_is_transparent() {
        let err = RelayError::from(BackendError::NoAnswer);
        assert_eq!(err.to_string(), "No response from server");
    }
}
