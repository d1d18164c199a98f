use std::marker::PhantomData;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::Result;
use crate::models::{ChangeRow, ItemRow};

/// Ties a row type to the table it lives in. Both tables share the same shape
/// (a unique text key plus a `quantity` column), so the key column is the only
/// thing that varies besides the table name.
pub trait TableRow: Sized {
    const TABLE: &'static str;
    const KEY_COLUMN: &'static str;

    /// Build the row from a `SELECT <key>, quantity` result.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

impl TableRow for ChangeRow {
    const TABLE: &'static str = "change";
    const KEY_COLUMN: &'static str = "denomination";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ChangeRow {
            denomination: row.get(0)?,
            quantity: row.get(1)?,
        })
    }
}

impl TableRow for ItemRow {
    const TABLE: &'static str = "items";
    const KEY_COLUMN: &'static str = "name";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ItemRow {
            name: row.get(0)?,
            quantity: row.get(1)?,
        })
    }
}

/// Borrowed handle over one table. Every method runs a fresh query, so the
/// results always reflect what is persisted right now.
pub struct TableView<'conn, R> {
    conn: &'conn Connection,
    _row: PhantomData<fn() -> R>,
}

impl<'conn, R: TableRow> TableView<'conn, R> {
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _row: PhantomData,
        }
    }

    /// Table this view reads from, handy for log lines and error messages
    /// that should not hard-code the SQL name.
    pub fn name(&self) -> &'static str {
        R::TABLE
    }

    /// Every row in insertion order.
    pub fn all(&self) -> Result<Vec<R>> {
        let sql = format!(
            "SELECT {}, quantity FROM {} ORDER BY rowid",
            R::KEY_COLUMN,
            R::TABLE
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let rows = stmt
            .query_map([], |row| R::from_row(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
    }

    /// Number of rows currently stored. SQLite reports `COUNT(*)` as a signed
    /// integer, so a negative value would mean a corrupt result rather than
    /// an empty table and is surfaced as an error.
    pub fn count(&self) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", R::TABLE);
        let count = self.conn.query_row(&sql, [], |row| {
            let count: i64 = row.get(0)?;
            u64::try_from(count)
                .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, count))
        })?;
        Ok(count)
    }

    /// Look a row up by its unique key.
    pub fn find(&self, key: &str) -> Result<Option<R>> {
        let sql = format!(
            "SELECT {key_column}, quantity FROM {table} WHERE {key_column} = ?1",
            key_column = R::KEY_COLUMN,
            table = R::TABLE
        );

        let row = self
            .conn
            .query_row(&sql, params![key], |row| R::from_row(row))
            .optional()?;

        Ok(row)
    }
}
