use super::base::DmlBase;
use crate::db::Db;
use crate::mapping::{EntityMapping, Field};

use trellis_core::{
    driver::Connection,
    err,
    schema::ColumnId,
    stmt::{self, Expr, Statement, Value},
    Error, Result,
};
use trellis_sql::{AutoKeyStrategy, Rendered};

use std::marker::PhantomData;

/// Builds an INSERT into an entity's table.
///
/// [`submit`](Insert::submit) maps a struct instance through its registered
/// accessors; [`set`](Insert::set) and [`execute`](Insert::execute) build the
/// statement by hand. Either way, the table's discriminator values are
/// stamped in.
pub struct Insert<'a, T> {
    base: DmlBase<'a>,
    sets: Vec<(ColumnId, Expr)>,
    rendered: Option<Rendered>,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T: Default + Clone + 'static> Insert<'a, T> {
    pub(crate) fn new(db: &'a Db) -> Result<Insert<'a, T>> {
        let table = db.mappings.of::<T>()?.table;
        Ok(Insert {
            base: DmlBase::new(db, table),
            sets: Vec::new(),
            rendered: None,
            _entity: PhantomData,
        })
    }

    /// Set a column explicitly. On [`submit`](Insert::submit) explicit sets
    /// override mapped field values.
    pub fn set(&mut self, column: impl Into<ColumnId>, value: impl Into<Expr>) -> &mut Self {
        self.sets.push((column.into(), value.into()));
        self.rendered = None;
        self
    }

    pub fn bind(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.base.params.bind(name, value);
        self
    }

    /// The finalized SQL for the hand-built statement.
    pub fn sql(&mut self) -> Result<&str> {
        self.finalize()?;
        match &self.rendered {
            Some(rendered) => Ok(&rendered.sql),
            None => Err(err!("statement was not finalized")),
        }
    }

    /// Execute the hand-built statement.
    pub fn execute(&mut self, conn: &mut dyn Connection) -> Result<u64> {
        self.finalize()?;
        match &self.rendered {
            Some(rendered) => self.base.run_exec(conn, rendered),
            None => Err(err!("statement was not finalized")),
        }
    }

    fn finalize(&mut self) -> Result<()> {
        if self.rendered.is_some() {
            return Ok(());
        }

        let mut counter = 0;
        let sets = self.sets.clone();
        let mut stmt = stmt::Insert::new(self.base.table);
        self.stamp_discriminators(&mut stmt);
        for (column, expr) in sets {
            let expr = self.base.rewrite_literals(expr, &mut counter);
            stmt.set(column, expr);
        }

        self.rendered = Some(self.base.render(&Statement::from(stmt))?);
        Ok(())
    }

    /// Map the entity through its accessors and execute.
    ///
    /// Unset key values are filled per the translator's generation strategy;
    /// the version column starts at 1; mandatory columns must be set. On
    /// success the generated key and the fresh version are written back into
    /// the entity and its change marks are cleared.
    pub fn submit(&mut self, entity: &mut T, conn: &mut dyn Connection) -> Result<()> {
        let db = self.base.db;
        let mapping = db.mappings.of::<T>()?;

        if let Some(hook) = &mapping.hooks.pre_insert {
            hook(entity)?;
        }

        let registry = &db.registry;
        let table = registry.table(self.base.table);
        let strategy = db.translator.auto_key_strategy();

        let mut stmt = stmt::Insert::new(self.base.table);
        self.stamp_discriminators(&mut stmt);

        // A key column left pending here is filled in by the database and
        // read back after execution.
        let mut pending_key: Option<&Field> = None;

        for field in &mapping.fields {
            if field.is_virtual || field.version {
                continue;
            }

            let value = field.read(&*entity)?;

            if field.key && value.is_unset() {
                match strategy {
                    AutoKeyStrategy::None => {}
                    AutoKeyStrategy::BeforeInsert => {
                        let value = self.generated_key(conn, mapping, field)?;
                        field.write(&mut *entity, value.clone())?;
                        stmt.set(field.column, value);
                    }
                    AutoKeyStrategy::Returning | AutoKeyStrategy::AfterInsert => {
                        if pending_key.is_some() {
                            return Err(Error::validation(format!(
                                "entity `{}` has more than one unset key column; composite keys cannot be generated",
                                mapping.entity_name
                            )));
                        }
                        if matches!(strategy, AutoKeyStrategy::Returning) {
                            stmt.returning = Some(field.column);
                        }
                        pending_key = Some(field);
                    }
                }
                continue;
            }

            if value.is_unset() && field.mandatory {
                return Err(Error::validation(format!(
                    "entity `{}` has no value for mandatory column `{}`",
                    mapping.entity_name, field.alias
                )));
            }

            stmt.set(field.column, value);
        }

        if let Some(version_column) = table.version {
            stmt.set(version_column, Value::from(1i64));
        }

        for (column, expr) in &self.sets {
            stmt.set(*column, expr.clone());
        }

        let rendered = self.base.render(&Statement::from(stmt))?;
        let args = rendered.bind(&self.base.params)?;

        match (strategy, pending_key) {
            (AutoKeyStrategy::Returning, Some(field)) => {
                let rows = conn.query(&rendered.sql, &args)?;
                let value = rows.scalar().cloned().ok_or_else(|| {
                    Error::validation(format!(
                        "no generated key returned for entity `{}`",
                        mapping.entity_name
                    ))
                })?;
                field.write(&mut *entity, value)?;
            }
            (AutoKeyStrategy::AfterInsert, Some(field)) => {
                conn.exec(&rendered.sql, &args)?;
                let value = self.generated_key(conn, mapping, field)?;
                field.write(&mut *entity, value)?;
            }
            _ => {
                conn.exec(&rendered.sql, &args)?;
            }
        }

        if let Some(field) = mapping.version_field() {
            field.write(&mut *entity, Value::from(1i64))?;
        }
        mapping.clear_marks(entity)?;

        if let Some(hook) = &mapping.hooks.post_insert {
            hook(entity)?;
        }
        Ok(())
    }

    fn stamp_discriminators(&self, stmt: &mut stmt::Insert) {
        let table = self.base.db.registry.table(self.base.table);
        for disc in &table.discriminators {
            stmt.set(disc.column, disc.value.clone());
        }
    }

    /// Run the translator's generator query for one key column.
    fn generated_key(
        &self,
        conn: &mut dyn Connection,
        mapping: &EntityMapping,
        field: &Field,
    ) -> Result<Value> {
        let registry = &self.base.db.registry;
        let table = registry.table(self.base.table);
        let column = registry.column(field.column);

        let query = self
            .base
            .db
            .translator
            .auto_number_query(table, column)
            .ok_or_else(|| {
                Error::validation(format!(
                    "translator cannot generate keys for column `{}`",
                    column.name
                ))
            })?;

        let rows = conn.query(&query, &[])?;
        rows.scalar().cloned().ok_or_else(|| {
            Error::validation(format!(
                "key generator for entity `{}` returned no value",
                mapping.entity_name
            ))
        })
    }
}
