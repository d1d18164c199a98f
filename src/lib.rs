//! Data access for the vending machine's embedded SQLite store.
//!
//! A [`Store`] is only handed out for a database file that already exists. It
//! keeps the `change` and `items` tables in place, seeds them with the default
//! float and stock, and exposes a live [`TableView`] over each.
pub mod db;
pub mod error;
pub mod models;

pub use db::{SeedReport, Store, TableView, DEFAULT_DB_PATH};
pub use error::{Result, StoreError};
pub use models::{ChangeRow, ItemRow};
