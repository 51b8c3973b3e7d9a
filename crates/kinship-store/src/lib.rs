//! Kinship Storage Layer
//!
//! Implements the `RelationshipStore` and `IdentityDirectory` traits on top
//! of SQLite.
//!
//! # Architecture
//!
//! - One `relationships` table keyed by a UUIDv7 blob, with a unique index on
//!   the normalized pair `(pair_low, pair_high)` so concurrent inserts for the
//!   same pair cannot both succeed
//! - Resurrection (delete rejected + insert pending) runs in one transaction
//! - An `accepted_edges` view answers the mutual-friends intersection
//! - A small `identities` table stands in for the identity service
//!
//! # Examples
//!
//! ```no_run
//! use kinship_store::SqliteStore;
//!
//! let store = SqliteStore::open(":memory:").unwrap();
//! // Store is now ready for relationship operations
//! ```

#![warn(missing_docs)]

mod identity;
mod relationships;

use kinship_domain::traits::StoreFailure;
use kinship_domain::DomainError;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The pair (or id) already holds a record
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A CHECK constraint rejected the row
    #[error("Constraint violated: {0}")]
    Constraint(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A previous holder of the connection lock panicked
    #[error("Connection lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Classify a write failure, separating uniqueness conflicts and CHECK
    /// violations from other database errors
    pub(crate) fn from_write(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(ffi_err, msg) = &err {
            let detail = msg.clone().unwrap_or_else(|| ffi_err.to_string());
            match ffi_err.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return StoreError::Conflict(detail)
                }
                rusqlite::ffi::SQLITE_CONSTRAINT_CHECK => return StoreError::Constraint(detail),
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        StoreError::InvalidData(err.to_string())
    }
}

impl StoreFailure for StoreError {
    fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

/// SQLite-based implementation of the relationship and identity stores
///
/// The connection sits behind a `Mutex`, so one `SqliteStore` can be shared
/// between threads (for example inside an `Arc`). Each call holds the lock
/// only for its own statements; atomicity across the lookup-then-insert
/// sequence of the lifecycle service comes from the unique pair index, not
/// from the lock.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use kinship_store::SqliteStore;
    ///
    /// let store = SqliteStore::open("kinship.db").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Apply the schema; every statement is idempotent
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        let conn = self.lock()?;
        conn.execute_batch(schema)?;
        tracing::debug!("relationship store schema ready");
        Ok(())
    }

    /// Acquire the connection
    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}
