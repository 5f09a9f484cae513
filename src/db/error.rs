//! Error types for the persistence layer.

use thiserror::Error;

/// Errors that can occur while writing ingested data to the store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The underlying store rejected a statement
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A parent insert did not yield a generated identifier
    #[error("Insert into {table} did not return a generated id")]
    MissingInsertId { table: &'static str },
}
