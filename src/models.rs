//! Row types that mirror the two SQLite tables. They stay plain data holders;
//! the `TableRow` impls in `db::tables` teach the query layer how to read them.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Stock of one coin or note held in the machine's float.
pub struct ChangeRow {
    /// Unique label such as `1p` or `£2`.
    pub denomination: String,
    pub quantity: i64,
}

impl fmt::Display for ChangeRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.denomination, self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A product slot in the machine. `quantity` may be zero for sold-out items.
pub struct ItemRow {
    /// Unique product label shown to customers.
    pub name: String,
    pub quantity: i64,
}

impl fmt::Display for ItemRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.name, self.quantity)
    }
}
