use super::base::DmlBase;
use crate::db::Db;

use trellis_core::{
    driver::Connection,
    err,
    stmt::{self, Expr, Statement, Value},
    Error, Result,
};
use trellis_sql::Rendered;

use std::marker::PhantomData;

/// Builds a DELETE against an entity's table.
///
/// [`submit`](Delete::submit) derives the WHERE clause from a struct
/// instance's key columns and, on a versioned table, its current version.
/// [`filter`](Delete::filter)/[`execute`](Delete::execute) build the
/// statement by hand; discriminator predicates are injected either way.
pub struct Delete<'a, T> {
    base: DmlBase<'a>,
    rendered: Option<Rendered>,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T: Default + Clone + 'static> Delete<'a, T> {
    pub(crate) fn new(db: &'a Db) -> Result<Delete<'a, T>> {
        let table = db.mappings.of::<T>()?.table;
        Ok(Delete {
            base: DmlBase::new(db, table),
            rendered: None,
            _entity: PhantomData,
        })
    }

    /// AND a predicate into the WHERE clause.
    pub fn filter(&mut self, expr: Expr) -> &mut Self {
        self.base.filters.push(expr);
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

    /// Execute the hand-built statement, returning the affected row count.
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

        self.assert_physical()?;
        let alias = self.base.alias.clone();

        let mut counter = 0;
        let mut stmt = stmt::Delete::new(self.base.table, alias.clone());

        let mut parts = self.base.discriminator_filters();
        let originals = self.base.filters.clone();
        for filter in originals {
            let mut filter = self.base.rewrite_literals(filter, &mut counter);
            filter.set_table_alias(&alias);
            parts.push(filter);
        }
        if !parts.is_empty() {
            stmt.filter = Some(Expr::and(parts));
        }

        self.rendered = Some(self.base.render(&Statement::from(stmt))?);
        Ok(())
    }

    /// Match the entity's key columns (and its version, when the table is
    /// versioned) and execute.
    ///
    /// Zero affected rows on a versioned table is an optimistic-lock
    /// conflict: the row was changed or removed by someone else since this
    /// entity was read.
    pub fn submit(&mut self, entity: &mut T, conn: &mut dyn Connection) -> Result<u64> {
        let db = self.base.db;
        let mapping = db.mappings.of::<T>()?;

        if let Some(hook) = &mapping.hooks.pre_delete {
            hook(entity)?;
        }

        let alias = self.base.alias.clone();
        let mut stmt = stmt::Delete::new(self.base.table, alias.clone());

        if mapping.key_fields().next().is_none() {
            return Err(Error::missing_key(format!(
                "entity `{}` has no key fields mapped",
                mapping.entity_name
            )));
        }
        let mut parts = Vec::new();
        for field in mapping.key_fields() {
            let value = field.read(&*entity)?;
            if value.is_unset() {
                return Err(Error::missing_key(format!(
                    "entity `{}` has no value for key column `{}`",
                    mapping.entity_name, field.alias
                )));
            }
            parts.push(Expr::eq(
                Expr::column_with_alias(field.column, alias.clone()),
                value,
            ));
        }

        let mut versioned = false;
        if let Some(field) = mapping.version_field() {
            let value = field.read(&*entity)?;
            if value.is_unset() {
                return Err(Error::missing_key(format!(
                    "entity `{}` has no version value; was it ever inserted?",
                    mapping.entity_name
                )));
            }
            parts.push(Expr::eq(
                Expr::column_with_alias(field.column, alias.clone()),
                value,
            ));
            versioned = true;
        }

        stmt.filter = self.base.build_filter(parts);

        let rendered = self.base.render(&Statement::from(stmt))?;
        let affected = self.base.run_exec(conn, &rendered)?;

        if affected == 0 && versioned {
            return Err(Error::optimistic_lock(format!(
                "`{}` was updated or deleted by another transaction",
                mapping.entity_name
            )));
        }

        if let Some(hook) = &mapping.hooks.post_delete {
            hook(entity)?;
        }
        Ok(affected)
    }

    /// Deletes cannot join, so virtual column references have nowhere to
    /// resolve.
    fn assert_physical(&self) -> Result<()> {
        for filter in &self.base.filters {
            if let Some(column) = self.base.find_virtual(filter) {
                let column = self.base.db.registry.column(column);
                return Err(Error::validation(format!(
                    "virtual column `{}` cannot be referenced in a DELETE",
                    column.name
                )));
            }
        }
        Ok(())
    }
}
