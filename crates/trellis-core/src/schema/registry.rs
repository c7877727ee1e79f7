use super::*;

/// The sealed metadata registry: every table, column, and association the
/// application registered at startup.
///
/// A registry is produced once by [`RegistryBuilder::build`] and never
/// mutated afterward, which is what makes sharing it across concurrently
/// executing statements sound.
#[derive(Debug, Clone)]
pub struct Registry {
    pub(crate) tables: Vec<Table>,
    pub(crate) assocs: Vec<Assoc>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Get a table by ID. Panics when the ID does not identify a table in
    /// this registry.
    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        &self.tables[id.into().0]
    }

    /// Get an association by ID. Panics when the ID does not identify an
    /// association in this registry.
    pub fn assoc(&self, id: impl Into<AssocId>) -> &Assoc {
        &self.assocs[id.into().0]
    }

    /// Get a column by ID. Panics when the ID does not identify a column in
    /// this registry.
    pub fn column(&self, id: ColumnId) -> &Column {
        self.table(id.table).column(id)
    }

    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|table| table.name.eq_ignore_ascii_case(name))
    }

    /// Resolve an association by the name it was registered under on its
    /// origin table.
    pub fn assoc_named(&self, table: TableId, name: &str) -> Option<&Assoc> {
        let id = self.table(table).assoc_named(name)?;
        Some(self.assoc(id))
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> + '_ {
        self.tables.iter()
    }
}
