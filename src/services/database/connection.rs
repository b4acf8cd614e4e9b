use anyhow::{Context, Result};
use rusqlite::Connection;

use super::schema;

/// Thin wrapper around the SQLite connection backing the themes store.
pub struct Database {
    conn: Connection,
    path: String,
}

impl Database {
    /// Opens (or creates) a SQLite database at the provided path without
    /// touching its tables.
    pub fn new(path: &str) -> Result<Self> {
        let conn =
            Connection::open(path).context(format!("Failed to open database at {}", path))?;

        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }

    /// Opens the database and makes sure every table exists.
    ///
    /// The handle is released when the returned value is dropped.
    pub fn open(path: &str) -> Result<Self> {
        let db = Self::new(path)?;
        db.initialize_schema()?;
        log::debug!("Opened themes database at {}", path);
        Ok(db)
    }

    /// Provides read/write access to the underlying `rusqlite::Connection`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Path the database was opened with (`":memory:"` for in-memory).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Creates tables and runs column migrations.
    pub fn initialize_schema(&self) -> Result<()> {
        schema::initialize_schema(self.connection())
    }
}
