//! SQLite-backed rate history.
//!
//! # Design Decisions
//! - Append-only: rows are inserted, never updated or deleted
//! - One connection per write, opened and dropped inside the operation;
//!   a handle is never held across an await
//! - Schema is created idempotently when the store opens at process start
//! - No retry on failure; the caller's gate decides what a failed write
//!   means (nothing)

use std::path::PathBuf;

use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("background write aborted: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Append-only store of fetched quotes.
#[derive(Debug, Clone)]
pub struct RateStore {
    path: PathBuf,
}

impl RateStore {
    /// Open the store, creating the schema when absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };
        let conn = Connection::open(&store.path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS rate_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                bid TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );",
        )?;
        Ok(store)
    }

    /// Append one quote, returning its row id.
    pub fn append(&self, bid: &str) -> Result<i64, StoreError> {
        let conn = Connection::open(&self.path)?;
        conn.execute("INSERT INTO rate_history (bid) VALUES (?1)", params![bid])?;
        Ok(conn.last_insert_rowid())
    }

    /// Number of recorded quotes.
    pub fn count(&self) -> Result<i64, StoreError> {
        let conn = Connection::open(&self.path)?;
        let count = conn.query_row("SELECT COUNT(*) FROM rate_history", [], |row| row.get(0))?;
        Ok(count)
    }
}
