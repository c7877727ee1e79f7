use super::*;
use crate::stmt::Value;
use crate::{Error, Result};

use indexmap::IndexMap;

/// Accumulates registrations, then validates them into a sealed
/// [`Registry`].
///
/// Tables are declared with a closure configuring their columns; anything
/// that crosses table boundaries (associations, virtual columns) is
/// registered afterward on the builder itself, so it can resolve both ends.
#[derive(Default)]
pub struct RegistryBuilder {
    tables: Vec<Table>,
    assocs: Vec<Assoc>,
}

pub struct TableBuilder<'a> {
    table: &'a mut Table,
}

pub struct ColumnBuilder<'a> {
    table: &'a mut Table,
    index: usize,
}

impl RegistryBuilder {
    pub(crate) fn new() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn table(
        &mut self,
        name: impl Into<String>,
        alias: impl Into<String>,
        f: impl FnOnce(&mut TableBuilder<'_>),
    ) -> TableId {
        let id = TableId(self.tables.len());

        self.tables.push(Table {
            id,
            name: name.into(),
            alias: alias.into(),
            columns: vec![],
            key: vec![],
            version: None,
            deletion: None,
            discriminators: vec![],
            assocs: IndexMap::new(),
        });

        f(&mut TableBuilder {
            table: &mut self.tables[id.0],
        });

        id
    }

    /// Register an association from `(table, columns)` to `(table, columns)`
    /// under `name` on the origin table.
    pub fn assoc(
        &mut self,
        name: impl Into<String>,
        from: (TableId, &[&str]),
        to: (TableId, &[&str]),
    ) -> Result<AssocId> {
        let name = name.into();
        let (from_table, from_columns) = from;
        let (to_table, to_columns) = to;

        if from_columns.is_empty() {
            return Err(Error::invalid_schema(format!(
                "association `{name}` has no relation columns"
            )));
        }

        if from_columns.len() != to_columns.len() {
            return Err(Error::invalid_schema(format!(
                "association `{name}` relates {} columns to {}",
                from_columns.len(),
                to_columns.len()
            )));
        }

        if self.tables[from_table.0].assocs.contains_key(&name) {
            return Err(Error::invalid_schema(format!(
                "table `{}` already has an association named `{name}`",
                self.tables[from_table.0].name
            )));
        }

        let mut relations = vec![];

        for (from_name, to_name) in from_columns.iter().zip(to_columns) {
            relations.push(Relation {
                from: self.column_of(from_table, from_name),
                to: self.column_of(to_table, to_name),
            });
        }

        let id = AssocId(self.assocs.len());

        self.assocs.push(Assoc {
            id,
            name: name.clone(),
            from: from_table,
            to: to_table,
            relations,
            discriminator: None,
            many2many: None,
        });
        self.tables[from_table.0].assocs.insert(name, id);

        Ok(id)
    }

    /// Restrict an association with a static (column, value) predicate. The
    /// column must live on one of the two tables the edge touches.
    pub fn assoc_discriminator(
        &mut self,
        assoc: AssocId,
        table: TableId,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        let (from, to) = {
            let assoc = &self.assocs[assoc.0];
            (assoc.from, assoc.to)
        };

        if table != from && table != to {
            return Err(Error::invalid_schema(format!(
                "discriminator column `{column}` is on table `{}`, which association `{}` does not touch",
                self.tables[table.0].name, self.assocs[assoc.0].name
            )));
        }

        let id = self.column_of(table, column);
        self.assocs[assoc.0].discriminator = Some(Discriminator::new(id, value));

        Ok(())
    }

    /// Compose a many-to-many association from two simple associations that
    /// both originate from the junction table: `to_origin` (junction to the
    /// new edge's origin, traversed in reverse) and `to_target` (junction to
    /// the new edge's destination, traversed as-is).
    pub fn many_to_many(
        &mut self,
        name: impl Into<String>,
        to_origin: AssocId,
        to_target: AssocId,
    ) -> Result<AssocId> {
        let name = name.into();
        let first = self.assocs[to_origin.0].clone();
        let second = self.assocs[to_target.0].clone();

        if first.is_many2many() || second.is_many2many() {
            return Err(Error::invalid_schema(format!(
                "association `{name}` cannot compose another many-to-many edge"
            )));
        }

        if first.from != second.from {
            return Err(Error::invalid_schema(format!(
                "association `{name}`: junction hops start from different tables (`{}` vs `{}`)",
                self.tables[first.from.0].name, self.tables[second.from.0].name
            )));
        }

        let junction = first.from;
        let origin = first.to;
        let target = second.to;

        if self.tables[origin.0].assocs.contains_key(&name) {
            return Err(Error::invalid_schema(format!(
                "table `{}` already has an association named `{name}`",
                self.tables[origin.0].name
            )));
        }

        // Reverse the origin hop so traversal runs origin -> junction. The
        // reversed association is hidden: reachable through the composed
        // edge, never registered by name.
        let reversed = AssocId(self.assocs.len());
        self.assocs.push(Assoc {
            id: reversed,
            name: format!("{name}#junction"),
            from: origin,
            to: junction,
            relations: first
                .relations
                .iter()
                .map(|r| Relation {
                    from: r.to,
                    to: r.from,
                })
                .collect(),
            discriminator: first.discriminator.clone(),
            many2many: None,
        });

        let id = AssocId(self.assocs.len());
        self.assocs.push(Assoc {
            id,
            name: name.clone(),
            from: origin,
            to: target,
            relations: vec![],
            discriminator: None,
            many2many: Some(Many2Many {
                to_junction: reversed,
                from_junction: to_target,
            }),
        });
        self.tables[origin.0].assocs.insert(name, id);

        Ok(id)
    }

    /// Declare a column on `table` whose data actually lives in
    /// `target_column` of the table `assoc` leads to. Selecting or filtering
    /// on it joins through `assoc` implicitly.
    pub fn virtual_column(
        &mut self,
        table: TableId,
        name: impl Into<String>,
        assoc: AssocId,
        target_column: &str,
    ) -> Result<ColumnId> {
        let name = name.into();
        let (assoc_from, assoc_to) = {
            let assoc = &self.assocs[assoc.0];
            (assoc.from, assoc.to)
        };

        if assoc_from != table {
            return Err(Error::invalid_schema(format!(
                "virtual column `{name}`: association `{}` does not originate from table `{}`",
                self.assocs[assoc.0].name, self.tables[table.0].name
            )));
        }

        if self.tables[table.0].column_by_name(&name).is_some() {
            return Err(Error::invalid_schema(format!(
                "table `{}` already has a column named `{name}`",
                self.tables[table.0].name
            )));
        }

        let target = self.column_of(assoc_to, target_column);
        let id = ColumnId {
            table,
            index: self.tables[table.0].columns.len(),
        };

        self.tables[table.0].columns.push(Column {
            id,
            name: name.clone(),
            alias: name,
            key: false,
            mandatory: false,
            version: false,
            deletion: false,
            virtual_ref: Some(VirtualRef {
                assoc,
                column: target,
            }),
        });

        Ok(id)
    }

    pub fn build(self) -> Result<Registry> {
        for table in &self.tables {
            for other in &self.tables {
                if other.id < table.id && other.name.eq_ignore_ascii_case(&table.name) {
                    return Err(Error::invalid_schema(format!(
                        "table `{}` is registered twice",
                        table.name
                    )));
                }
            }

            for (i, column) in table.columns.iter().enumerate() {
                for prior in &table.columns[..i] {
                    if prior.alias.eq_ignore_ascii_case(&column.alias) {
                        return Err(Error::invalid_schema(format!(
                            "table `{}`: columns `{}` and `{}` share the alias `{}`",
                            table.name, prior.name, column.name, column.alias
                        )));
                    }
                }
            }
        }

        Ok(Registry {
            tables: self.tables,
            assocs: self.assocs,
        })
    }

    /// Fetch a column by name, registering it on first reference.
    fn column_of(&mut self, table: TableId, name: &str) -> ColumnId {
        let table = &mut self.tables[table.0];

        if let Some(column) = table.column_by_name(name) {
            return column.id;
        }

        let id = ColumnId {
            table: table.id,
            index: table.columns.len(),
        };

        table.columns.push(Column {
            id,
            name: name.to_string(),
            alias: name.to_string(),
            key: false,
            mandatory: false,
            version: false,
            deletion: false,
            virtual_ref: None,
        });

        id
    }
}

impl TableBuilder<'_> {
    /// Register a column, or pick up the existing registration when the name
    /// matches one already made (case-insensitively).
    pub fn column(&mut self, name: &str) -> ColumnBuilder<'_> {
        let index = match self.table.columns.iter().position(|c| c.named(name)) {
            Some(index) => index,
            None => {
                let id = ColumnId {
                    table: self.table.id,
                    index: self.table.columns.len(),
                };

                self.table.columns.push(Column {
                    id,
                    name: name.to_string(),
                    alias: name.to_string(),
                    key: false,
                    mandatory: false,
                    version: false,
                    deletion: false,
                    virtual_ref: None,
                });

                id.index
            }
        };

        ColumnBuilder {
            table: self.table,
            index,
        }
    }

    /// AND a static (column, value) predicate into every statement touching
    /// this table. The column is registered on first reference.
    pub fn discriminator(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        let id = self.column(column).id();
        self.table.discriminators.push(Discriminator::new(id, value));
        self
    }
}

impl ColumnBuilder<'_> {
    pub fn id(&self) -> ColumnId {
        self.table.columns[self.index].id
    }

    /// Override the result-set alias (defaults to the column name).
    pub fn alias(&mut self, alias: impl Into<String>) -> &mut Self {
        self.table.columns[self.index].alias = alias.into();
        self
    }

    pub fn key(&mut self) -> &mut Self {
        self.table.columns[self.index].key = true;

        let id = self.id();
        if !self.table.key.contains(&id) {
            self.table.key.push(id);
        }

        self
    }

    pub fn mandatory(&mut self) -> &mut Self {
        self.table.columns[self.index].mandatory = true;
        self
    }

    /// Mark this column as the table's optimistic-lock counter. Last write
    /// wins: a previously flagged column loses the marker.
    pub fn version(&mut self) -> &mut Self {
        if let Some(prior) = self.table.version {
            self.table.columns[prior.index].version = false;
        }

        self.table.columns[self.index].version = true;
        self.table.version = Some(self.id());
        self
    }

    /// Mark this column as the table's soft-delete flag. Last write wins,
    /// like [`version`](Self::version).
    pub fn deletion(&mut self) -> &mut Self {
        if let Some(prior) = self.table.deletion {
            self.table.columns[prior.index].deletion = false;
        }

        self.table.columns[self.index].deletion = true;
        self.table.deletion = Some(self.id());
        self
    }
}
