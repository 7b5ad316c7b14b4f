//! pagechat Session Registry
//!
//! A session (the backend calls it a tenant) is created every time a page is
//! scraped. Exactly one session is current per process; a newer scrape
//! supersedes the pointer but never reuses an id. Questions are always
//! routed to the current session.
//!
//! Multi-tab isolation is not provided: every UI context shares the same
//! current session.

mod registry;
mod session;

pub use registry::{SessionRegistry, SessionTicket};
pub use session::{Session, SessionId};
