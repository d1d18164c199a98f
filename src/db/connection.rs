use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rusqlite::Connection;

use super::tables::TableView;
use crate::error::{Result, StoreError};
use crate::models::{ChangeRow, ItemRow};

/// SQLite file name the machine expects in its working directory.
pub const DEFAULT_DB_PATH: &str = "machine-db.db";

/// Open handle on the machine database. Holding a `Store` means the file
/// existed when it was opened and both tables are present.
#[derive(Debug)]
pub struct Store {
    pub(super) conn: Connection,
    path: PathBuf,
}

impl Store {
    /// Open the database at [`DEFAULT_DB_PATH`] relative to the current
    /// working directory.
    pub fn open() -> Result<Self> {
        Self::open_at(DEFAULT_DB_PATH)
    }

    /// Open an existing database file and make sure the schema is in place.
    ///
    /// The file is never created here: `Connection::open` would happily make
    /// an empty database, so the existence check has to come first.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("refusing to open missing store at {}", path.display());
            return Err(StoreError::NotInitialized {
                path: path.to_path_buf(),
            });
        }

        let conn = Connection::open(path)?;
        ensure_schema(&conn)?;
        info!("opened store at {}", path.display());

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Location of the file this store was opened from. The binary echoes it
    /// back after `init` so the operator can see which file was touched.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Live view over the coin and note float.
    pub fn change(&self) -> TableView<'_, ChangeRow> {
        TableView::new(&self.conn)
    }

    /// Live view over the product stock.
    pub fn items(&self) -> TableView<'_, ItemRow> {
        TableView::new(&self.conn)
    }
}

/// Create both tables unless they already exist. Safe to call any number of
/// times; opening and seeding both go through here.
pub(super) fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS change (
            denomination TEXT NOT NULL UNIQUE,
            quantity INTEGER NOT NULL
        )",
        [],
    )?;
    debug!("ensured table change");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS items (
            name TEXT NOT NULL UNIQUE,
            quantity INTEGER NOT NULL
        )",
        [],
    )?;
    debug!("ensured table items");

    Ok(())
}
