use super::{AssocId, TableId};

use std::fmt;

/// Uniquely identifies a column within a registry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnId {
    /// Table the column belongs to
    pub table: TableId,

    /// Index of the column within the table
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: ColumnId,

    /// Physical column name. Lookups by name are case-insensitive.
    pub name: String,

    /// Result-set alias. Defaults to the name; must be unique within the
    /// table.
    pub alias: String,

    /// Part of the table's key.
    pub key: bool,

    /// A value is required on insert.
    pub mandatory: bool,

    /// Carries the table's optimistic-lock counter.
    pub version: bool,

    /// Carries the table's soft-delete flag.
    pub deletion: bool,

    /// Present when the column's data lives in a related table. Referencing
    /// a virtual column joins through `assoc` and reads `column` there.
    pub virtual_ref: Option<VirtualRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualRef {
    pub assoc: AssocId,
    pub column: ColumnId,
}

impl Column {
    pub fn is_virtual(&self) -> bool {
        self.virtual_ref.is_some()
    }

    /// Case-insensitive name match, the identity contract for columns of one
    /// table.
    pub fn named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColumnId({}/{})", self.table.0, self.index)
    }
}
