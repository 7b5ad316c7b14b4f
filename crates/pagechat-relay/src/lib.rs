//! pagechat Relay
//!
//! The privileged coordinator every UI context talks to. UI contexts send a
//! [`RelayRequest`] carrying only the page URL or the question; the relay
//! stamps the session id from its [`SessionRegistry`](pagechat_session::SessionRegistry),
//! calls the backend and hands a [`RelayResponse`] back to exactly the
//! caller that asked.
//!
//! Errors never escape the relay. Every failure ends up as
//! `{success: false, error: "..."}` on the wire.

mod broker;
mod error;
mod host;
mod message;
mod relay;
mod wire;

pub use broker::{PendingReply, RelayHandle};
pub use error::{ErrorKind, RelayError};
pub use host::serve_lines;
pub use message::{RelayPayload, RelayRequest, RelayResponse};
pub use relay::{Relay, ScrapeFailurePolicy};
pub use wire::{WireEnvelope, WireReply, WireRequest, WireResponse};

pub type Result<T> = std::result::Result<T, RelayError>;
