//! # Storage Layer
//!
//! SQLite persistence for every entity. The `Database` owns the connection and
//! applies migrations on open; the submodules are thin repositories of free
//! functions that take a `&Connection`, so the same query can run standalone
//! or inside a `Transaction` (which derefs to `Connection`).
//!
//! ## Modules
//!
//! - **`migrations`**: versioned schema, tracked with `PRAGMA user_version`.
//! - **`users`**, **`flashcards`**, **`sessions`**, **`practice_results`**,
//!   **`statistics`**, **`logs`**: one repository per table.

pub mod flashcards;
pub mod logs;
pub mod migrations;
pub mod practice_results;
pub mod sessions;
pub mod statistics;
pub mod users;

use rusqlite::{Connection, Transaction};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Database schema version {found} is newer than this build supports ({supported}).")]
    UnsupportedSchema { found: i64, supported: i64 },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// An open, migrated SQLite database.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file at `path` and brings its schema up to date.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        log::debug!("Opening database at '{}'", path.display());
        Self::init(Connection::open(path)?)
    }

    /// A private, throwaway database. Used by tests.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> StorageResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")?;
        migrations::migrate(&mut conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Runs `f` inside a transaction. Commits when `f` returns `Ok`; any error
    /// drops the transaction, which rolls everything back.
    pub fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
        E: From<rusqlite::Error>,
    {
        let tx = self.conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}
