//! Widget error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Storage error: {0}")]
    Storage(#[from] pagechat_storage::StorageError),
}
