//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] pagechat_storage::StorageError),

    #[error("Backend error: {0}")]
    Backend(#[from] pagechat_backend::BackendError),

    #[error("Widget error: {0}")]
    Widget(#[from] pagechat_widget::WidgetError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Page is not accessible: {0}")]
    InaccessiblePage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
