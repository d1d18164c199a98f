//! Persistence module split across logical submodules.

mod connection;
mod seed;
mod tables;

pub use connection::{Store, DEFAULT_DB_PATH};
pub use seed::{SeedReport, DEFAULT_CHANGE, DEFAULT_ITEMS};
pub use tables::{TableRow, TableView};
