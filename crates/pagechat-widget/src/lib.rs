//! pagechat Widget
//!
//! Drives one chat widget instance through its lifecycle and renders relay
//! results through a [`Surface`]. Two presentation variants share the same
//! protocol against the relay:
//! - the in-page overlay, opened from a floating trigger
//! - the popup panel, which remembers the last processed document
//!
//! ```text
//! Hidden --open--> Loading --reply--> Ready --submit--> AwaitingAnswer
//!   ^                                   ^                     |
//!   |                                   +-------reply---------+
//!   +------------------close (from any visible state)---------+
//! ```

mod controller;
mod document;
mod error;
mod message;
mod state;
mod surface;

pub use controller::{Outstanding, ReopenPolicy, Ticket, Variant, WidgetController};
pub use document::{DocumentStore, StoredDocument};
pub use error::WidgetError;
pub use message::{ChatMessage, Notice, NoticeLevel, Page, Role};
pub use state::WidgetState;
pub use surface::Surface;

pub type Result<T> = std::result::Result<T, WidgetError>;
