//! pagechat Core
//!
//! Wires the storage, backend, session, relay and widget crates into one
//! [`Extension`] container, and owns configuration, logging setup and page
//! context resolution.

mod config;
mod error;
mod extension;
mod page;

pub use config::Config;
pub use error::CoreError;
pub use extension::Extension;
pub use page::PageContext;

// Re-export the pieces front ends need
pub use pagechat_backend::{Backend, BackendClient, BackendError, DEFAULT_BACKEND_URL};
pub use pagechat_relay::{
    serve_lines, ErrorKind, PendingReply, RelayError, RelayHandle, RelayPayload, RelayRequest,
    RelayResponse, ScrapeFailurePolicy,
};
pub use pagechat_session::{SessionId, SessionRegistry};
pub use pagechat_storage::{Database, StorageError};
pub use pagechat_widget::{
    ChatMessage, DocumentStore, Notice, NoticeLevel, Outstanding, Page, ReopenPolicy, Role,
    StoredDocument, Surface, Ticket, Variant, WidgetController, WidgetError, WidgetState,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// Logs go to stderr. `RUST_LOG` wins over `default_directive`.
pub fn init_logging(default_directive: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
