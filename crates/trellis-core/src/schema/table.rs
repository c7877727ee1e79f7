use super::*;

use indexmap::IndexMap;
use std::fmt;

/// Uniquely identifies a table within a registry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableId(pub usize);

#[derive(Debug, Clone)]
pub struct Table {
    pub id: TableId,

    /// Physical table name.
    pub name: String,

    /// Short moniker, used as the default base alias of statements targeting
    /// this table and as the prefix for aliases minted off it.
    pub alias: String,

    /// All columns, in registration order. [`ColumnId::index`] indexes here.
    pub columns: Vec<Column>,

    /// Key column subset, in registration order. May be empty.
    pub key: Vec<ColumnId>,

    /// Optimistic-lock counter column, if the table has one.
    pub version: Option<ColumnId>,

    /// Soft-delete flag column, if the table has one.
    pub deletion: Option<ColumnId>,

    /// Static predicates AND-ed into every statement touching this table.
    pub discriminators: Vec<Discriminator>,

    /// Associations originating here, keyed by registered name.
    pub assocs: IndexMap<String, AssocId>,
}

impl Table {
    /// Get a column by ID. Panics when the ID belongs to another table.
    pub fn column(&self, id: ColumnId) -> &Column {
        assert_eq!(self.id, id.table, "column does not belong to this table");
        &self.columns[id.index]
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.named(name))
    }

    pub fn assoc_named(&self, name: &str) -> Option<AssocId> {
        self.assocs.get(name).copied()
    }

    pub fn key_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.key.iter().map(|id| &self.columns[id.index])
    }

    /// Columns that map to entity fields: everything except virtual markers'
    /// backing storage is real, so this is simply the non-virtual set.
    pub fn physical_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|column| !column.is_virtual())
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableId({})", self.0)
    }
}

impl From<&Table> for TableId {
    fn from(value: &Table) -> Self {
        value.id
    }
}
