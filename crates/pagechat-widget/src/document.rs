//! Popup document memory
//!
//! The popup remembers the last processed document under the
//! `currentDocUrl` and `documentTitle` keys so reopening it shows that
//! document without another scrape.

use pagechat_storage::Database;
use serde::{Deserialize, Serialize};

use crate::Result;

const URL_KEY: &str = "currentDocUrl";
const TITLE_KEY: &str = "documentTitle";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub url: String,
    pub title: String,
}

#[derive(Clone)]
pub struct DocumentStore {
    db: Database,
}

impl DocumentStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn load(&self) -> Result<Option<StoredDocument>> {
        let Some(url) = self.db.get_setting(URL_KEY)? else {
            return Ok(None);
        };
        let title = self
            .db
            .get_setting(TITLE_KEY)?
            .unwrap_or_else(|| "Document".to_string());

        Ok(Some(StoredDocument { url, title }))
    }

    pub fn save(&self, document: &StoredDocument) -> Result<()> {
        self.db.set_settings(&[
            (URL_KEY, document.url.as_str()),
            (TITLE_KEY, document.title.as_str()),
        ])?;

        tracing::debug!(url = %document.url, title = %document.title, "Saved popup document");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.db.remove_settings(&[URL_KEY, TITLE_KEY])?;
        Ok(())
    }
}
