//! Error type shared by every persistence helper. Callers that only care about
//! the message can still wrap these in `anyhow`, while tests and tooling can
//! match on the variants that carry meaning for the vending machine.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file was never created. Opening refuses to create it so a
    /// typo in the path cannot silently produce a fresh, empty machine.
    #[error("store not initialized: {} does not exist", path.display())]
    NotInitialized { path: PathBuf },

    /// A seed row collided with an existing unique key.
    #[error("{table} already contains a row keyed {key:?}")]
    UniqueConstraintViolation { table: &'static str, key: String },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
