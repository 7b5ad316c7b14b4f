//! Session data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier sent to the backend as `tenant_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub(crate) fn from_counter(counter: u64) -> Self {
        Self(format!("session_{}", counter))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix, used for ordering checks.
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix("session_")?.parse().ok()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Page the session was created for
    pub source_url: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn new(counter: u64, source_url: String) -> Self {
        Self {
            id: SessionId::from_counter(counter),
            source_url,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_format() {
        let id = SessionId::from_counter(7);
        assert_eq!(id.as_str(), "session_7");
        assert_eq!(id.to_string(), "session_7");
        assert_eq!(id.sequence(), Some(7));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = SessionId::from_counter(1);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"session_1\"");
    }
}
