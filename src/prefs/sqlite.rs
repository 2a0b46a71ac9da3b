use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, warn};

use super::PreferenceStore;

pub struct SqlitePrefs {
    conn: Connection,
}

impl SqlitePrefs {
    pub fn open_default() -> Result<Self> {
        let path = default_db_path()?;
        Self::open(path)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create prefs dir {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open prefs db {}", path.display()))?;
        init_schema(&conn)?;
        debug!(path = %path.display(), "opened preference store");
        Ok(Self { conn })
    }

    fn try_read(&self, key: &str) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM prefs WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
    }

    fn try_write(&self, key: &str, value: &str) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT INTO prefs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

impl PreferenceStore for SqlitePrefs {
    fn read(&self, key: &str) -> Option<String> {
        self.try_read(key).unwrap_or_else(|error| {
            warn!(key, %error, "preference read failed; using default");
            None
        })
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(error) = self.try_write(key, value) {
            warn!(key, value, %error, "preference write dropped");
        }
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
PRAGMA journal_mode=WAL;
CREATE TABLE IF NOT EXISTS prefs (
  key TEXT PRIMARY KEY,
  value TEXT NOT NULL
);
"#,
    )
    .context("failed to initialize prefs schema")?;
    Ok(())
}

pub fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("failed to resolve data dir")?;
    Ok(base.join("kanso"))
}

fn default_db_path() -> Result<PathBuf> {
    Ok(default_data_dir()?.join("prefs.sqlite"))
}
