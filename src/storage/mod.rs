use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("could not locate home directory")]
    NoHomeDir,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const TERM_KEY: &str = "search";

/// Key/value slot for the last search term, surviving restarts.
///
/// A session that cannot open its database keeps working with in-memory term
/// state only: reads return the caller's default and writes are dropped.
pub struct TermStore {
    conn: Option<Connection>,
}

impl TermStore {
    /// Opens the settings database under the user's home directory, falling
    /// back to a disabled store if that fails.
    pub fn open() -> Self {
        match Self::default_path().and_then(|path| Self::open_at(&path)) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("settings store unavailable, term will not persist: {}", e);
                Self::disabled()
            }
        }
    }

    /// Opens (creating if needed) the settings database at `path`.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// A store that never persists anything.
    pub fn disabled() -> Self {
        Self { conn: None }
    }

    fn default_path() -> Result<PathBuf, StorageError> {
        let home = dirs_next::home_dir().ok_or(StorageError::NoHomeDir)?;
        Ok(home.join(".story-search").join("settings.db"))
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self { conn: Some(conn) })
    }

    /// Returns the stored term, or `default` when absent or unreadable.
    pub fn read(&self, default: &str) -> String {
        let Some(conn) = &self.conn else {
            return default.to_string();
        };

        let result = conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![TERM_KEY],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => value,
            Err(rusqlite::Error::QueryReturnedNoRows) => default.to_string(),
            Err(e) => {
                log::warn!("failed to read last search term: {}", e);
                default.to_string()
            }
        }
    }

    /// Persists the active term. Failures are logged and swallowed; the
    /// session continues with its in-memory term.
    pub fn write(&self, term: &str) {
        let Some(conn) = &self.conn else { return };

        if let Err(e) = conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![TERM_KEY, term],
        ) {
            log::warn!("failed to persist search term: {}", e);
        }
    }
}
