use log::{debug, info};
use rusqlite::{ffi, params, Connection, Error as SqlError};

use super::connection::{ensure_schema, Store};
use super::tables::TableRow;
use crate::error::{Result, StoreError};
use crate::models::{ChangeRow, ItemRow};

/// Float loaded into a brand new machine, smallest coin first.
pub const DEFAULT_CHANGE: [(&str, i64); 8] = [
    ("1p", 100),
    ("2p", 100),
    ("5p", 100),
    ("10p", 100),
    ("20p", 100),
    ("50p", 100),
    ("£1", 100),
    ("£2", 100),
];

/// Products stocked in a brand new machine.
pub const DEFAULT_ITEMS: [(&str, i64); 3] = [
    ("Toilet Roll", 2),
    ("Canned Tomatoes", 0),
    ("Sainsburys Lager", 5),
];

/// Number of rows each seeding call actually wrote. The counts come from
/// SQLite's changed-row totals, so skipped duplicates in the guarded variant
/// are not included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    /// Denomination rows inserted into `change`. A full strict seed writes
    /// one per entry in [`DEFAULT_CHANGE`].
    pub change_rows: usize,
    /// Product rows inserted into `items`, zero when every default item was
    /// already stocked.
    pub item_rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeedMode {
    Strict,
    IgnoreExisting,
}

impl SeedMode {
    fn insert_verb(self) -> &'static str {
        match self {
            SeedMode::Strict => "INSERT",
            SeedMode::IgnoreExisting => "INSERT OR IGNORE",
        }
    }
}

impl Store {
    /// Create both tables if needed and insert the default float and stock.
    ///
    /// Seeding is meant to happen once per database. Running it again fails
    /// with [`StoreError::UniqueConstraintViolation`] on the first duplicate
    /// key; use [`Store::seed_store_once`] when a repeat should be a no-op.
    pub fn seed_store(&self) -> Result<SeedReport> {
        seed(&self.conn, SeedMode::Strict)
    }

    /// Like [`Store::seed_store`], but rows whose key already exists are
    /// skipped instead of raising an error.
    pub fn seed_store_once(&self) -> Result<SeedReport> {
        seed(&self.conn, SeedMode::IgnoreExisting)
    }
}

fn seed(conn: &Connection, mode: SeedMode) -> Result<SeedReport> {
    ensure_schema(conn)?;

    let report = SeedReport {
        change_rows: insert_rows::<ChangeRow>(conn, &DEFAULT_CHANGE, mode)?,
        item_rows: insert_rows::<ItemRow>(conn, &DEFAULT_ITEMS, mode)?,
    };

    info!(
        "seeded store ({mode:?}): {} change rows, {} item rows",
        report.change_rows, report.item_rows
    );
    Ok(report)
}

fn insert_rows<R: TableRow>(
    conn: &Connection,
    rows: &[(&str, i64)],
    mode: SeedMode,
) -> Result<usize> {
    let sql = format!(
        "{} INTO {} ({}, quantity) VALUES (?1, ?2)",
        mode.insert_verb(),
        R::TABLE,
        R::KEY_COLUMN
    );
    let mut stmt = conn.prepare(&sql)?;

    let mut inserted = 0;
    for &(key, quantity) in rows {
        let changed = stmt
            .execute(params![key, quantity])
            .map_err(|err| map_unique_constraint(err, R::TABLE, key))?;
        debug!("{} {key:?}={quantity}: {changed} row(s)", R::TABLE);
        inserted += changed;
    }

    Ok(inserted)
}

/// Turn SQLite's unique-key failure into a variant callers can match on;
/// anything else passes through untouched.
fn map_unique_constraint(err: SqlError, table: &'static str, key: &str) -> StoreError {
    if let SqlError::SqliteFailure(failure, _) = &err {
        if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE {
            return StoreError::UniqueConstraintViolation {
                table,
                key: key.to_string(),
            };
        }
    }
    err.into()
}
