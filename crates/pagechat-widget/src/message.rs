//! Conversation log entries and page descriptions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Assistant message rendered from a failed reply
    pub is_error: bool,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into(), false)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content.into(), false)
    }

    pub fn assistant_error(error: &str) -> Self {
        Self::new(
            Role::Assistant,
            format!("Sorry, I couldn't process your question. {}", error),
            true,
        )
    }

    fn new(role: Role, content: String, is_error: bool) -> Self {
        Self {
            role,
            content,
            is_error,
            sent_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Status line shown above the log. Not part of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn loading() -> Self {
        Self::info("Loading content from the current webpage...")
    }

    pub fn loaded() -> Self {
        Self::info("Website content loaded. You can now ask questions.")
    }

    pub fn restored() -> Self {
        Self::info("Document processed successfully. What would you like to know about it?")
    }

    pub fn load_failed(error: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: format!("Failed to load website content: {}", error),
        }
    }

    fn info(text: &str) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.to_string(),
        }
    }
}

/// The page a widget instance is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub url: String,
    pub title: Option<String>,
}

impl Page {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Document")
    }
}
