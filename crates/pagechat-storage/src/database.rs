//! SQLite key-value store

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::Result;

const UPSERT: &str = "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the store at `path`, creating missing parent
    /// directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let conn = Connection::open(path)?;
        // The relay host and a popup may have the file open at once
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        tracing::debug!(path = %path.display(), "Opened database");
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        run_migrations(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock();
        let value = conn
            .prepare_cached("SELECT value FROM settings WHERE key = ?1")?
            .query_row([key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.set_settings(&[(key, value)])
    }

    /// Write several settings atomically.
    pub fn set_settings(&self, entries: &[(&str, &str)]) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.write(|tx| {
            let mut stmt = tx.prepare_cached(UPSERT)?;
            for (key, value) in entries {
                stmt.execute(params![key, value, updated_at])?;
            }
            Ok(())
        })
    }

    /// Remove settings; missing keys are ignored.
    pub fn remove_settings(&self, keys: &[&str]) -> Result<()> {
        self.write(|tx| {
            let mut stmt = tx.prepare_cached("DELETE FROM settings WHERE key = ?1")?;
            for key in keys {
                stmt.execute([key])?;
            }
            Ok(())
        })
    }

    fn write<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&Transaction<'_>) -> Result<()>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        f(&tx)?;
        tx.commit()?;
        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_setting("currentDocUrl").unwrap(), None);

        db.set_setting("currentDocUrl", "https://example.com").unwrap();
        db.set_setting("currentDocUrl", "https://example.org").unwrap();
        assert_eq!(
            db.get_setting("currentDocUrl").unwrap().as_deref(),
            Some("https://example.org")
        );
    }

    #[test]
    fn test_batch_set_and_remove() {
        let db = Database::open_in_memory().unwrap();
        db.set_settings(&[("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(db.get_setting("b").unwrap().as_deref(), Some("2"));

        db.remove_settings(&["a", "b", "missing"]).unwrap();
        assert_eq!(db.get_setting("a").unwrap(), None);
        assert_eq!(db.get_setting("b").unwrap(), None);
    }

    #[test]
    fn test_clones_share_connection() {
        let db = Database::open_in_memory().unwrap();
        let other = db.clone();
        other.set_setting("k", "v").unwrap();
        assert_eq!(db.get_setting("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_open_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pagechat.db");

        let db = Database::open(&path).unwrap();
        db.set_setting("k", "v").unwrap();
        drop(db);

        let reopened = Database::open(&path).unwrap();
        assert_eq!(reopened.get_setting("k").unwrap().as_deref(), Some("v"));
    }
}
