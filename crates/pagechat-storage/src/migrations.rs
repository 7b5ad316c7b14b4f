//! Schema migrations, tracked with `PRAGMA user_version`.

use rusqlite::Connection;

use crate::Result;

/// Each entry upgrades the schema by one version.
const MIGRATIONS: &[(&str, &str)] = &[(
    "settings store",
    "CREATE TABLE IF NOT EXISTS settings (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );",
)];

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    for (version, (name, sql)) in (1i64..).zip(MIGRATIONS) {
        if version <= current {
            continue;
        }
        tracing::info!(version, name = *name, "Running migration");
        conn.execute_batch(sql)?;
        conn.pragma_update(None, "user_version", version)?;
    }

    Ok(())
}
