//! pagechat Backend Client
//!
//! The extension never scrapes or answers anything itself. It forwards the
//! page URL and questions to a remote service exposing two endpoints:
//! - `POST /scrape` with `{website_url, tenant_id}`
//! - `POST /chat` with `{message, tenant_id}`
//!
//! Each call is exactly one round trip. There are no retries; a timeout is
//! only enforced when one is configured.

mod client;
mod error;
mod wire;

pub use client::{Backend, BackendClient, DEFAULT_BACKEND_URL};
pub use error::BackendError;
pub use wire::{ChatReply, ChatRequest, ScrapeReply, ScrapeRequest};

pub type Result<T> = std::result::Result<T, BackendError>;
