//! Backend error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Connection refused, DNS failure, timeout and the like.
    #[error("{0}")]
    Transport(String),

    #[error("Server responded with status: {0}")]
    Status(u16),

    /// The body could not be decoded into the expected shape.
    #[error("Invalid response from server: {0}")]
    Protocol(String),

    /// `/scrape` answered with a non-success status.
    #[error("{0}")]
    Rejected(String),

    /// `/chat` answered without a usable `response` field.
    #[error("No response from server")]
    NoAnswer,

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl BackendError {
    /// Network-level failures, including non-2xx statuses.
    pub fn is_transport(&self) -> bool {
        matches!(self, BackendError::Transport(_) | BackendError::Status(_))
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Transport("Request timed out".to_string())
        } else if err.is_decode() {
            BackendError::Protocol(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            BackendError::Status(502).to_string(),
            "Server responded with status: 502"
        );
        assert_eq!(BackendError::NoAnswer.to_string(), "No response from server");
        assert_eq!(
            BackendError::Rejected("Failed to scrape website.".to_string()).to_string(),
            "Failed to scrape website."
        );
    }

    #[test]
    fn test_transport_classification() {
        assert!(BackendError::Status(500).is_transport());
        assert!(BackendError::Transport("refused".to_string()).is_transport());
        assert!(!BackendError::Protocol("bad json".to_string()).is_transport());
        assert!(!BackendError::NoAnswer.is_transport());
    }
}
