//! pagechat Storage Layer
//!
//! SQLite-backed key-value persistence. The popup variant keeps its
//! last processed document here so reopening it restores that document.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
