// src/storage/sqlite.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use rusqlite::Connection;

use crate::core::errors::Result;
use crate::core::provider::ConnectionProvider;

const CREATE_ITEMS: &str = "CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    price INTEGER NOT NULL
);";

/// Connection provider opening a SQLite database file
///
/// Each call to [`ConnectionProvider::connect`] opens a new connection, so
/// concurrent chunk workers never share one. The busy timeout lets them
/// wait on each other's write locks instead of failing straight away.
#[derive(Debug, Clone)]
pub struct SqliteProvider {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteProvider {
    /// Provider for the database file at `path`
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        SqliteProvider {
            path: path.into(),
            busy_timeout: Duration::from_secs(5),
        }
    }

    /// Override how long a connection waits on a locked database
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the `items` table if it does not exist yet
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(CREATE_ITEMS)?;
        debug!("Schema ready in {}", self.path.display());
        Ok(())
    }
}

impl ConnectionProvider for SqliteProvider {
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(self.busy_timeout)?;
        // journal_mode answers with the resulting mode, so it has to be queried
        let mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        debug!("Opened {} (journal_mode={})", self.path.display(), mode);
        Ok(conn)
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}
