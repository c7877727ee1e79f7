use super::base::DmlBase;
use crate::db::Db;

use trellis_core::{
    driver::Connection,
    err,
    schema::ColumnId,
    stmt::{self, Expr, Statement, Value},
    Error, Result,
};
use trellis_sql::Rendered;

use std::marker::PhantomData;

/// Builds an UPDATE of an entity's table.
///
/// [`submit`](Update::submit) derives assignments and the WHERE clause from a
/// struct instance, honoring change marks and the optimistic-lock version.
/// [`set`](Update::set)/[`filter`](Update::filter)/[`execute`](Update::execute)
/// build the statement by hand; discriminator predicates are injected either
/// way.
pub struct Update<'a, T> {
    base: DmlBase<'a>,
    sets: Vec<(ColumnId, Expr)>,
    rendered: Option<Rendered>,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T: Default + Clone + 'static> Update<'a, T> {
    pub(crate) fn new(db: &'a Db) -> Result<Update<'a, T>> {
        let table = db.mappings.of::<T>()?.table;
        Ok(Update {
            base: DmlBase::new(db, table),
            sets: Vec::new(),
            rendered: None,
            _entity: PhantomData,
        })
    }

    /// Assign a column. Literal values become named parameters.
    pub fn set(&mut self, column: impl Into<ColumnId>, value: impl Into<Expr>) -> &mut Self {
        self.sets.push((column.into(), value.into()));
        self.rendered = None;
        self
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

        // Directives keep their original form; the rewrite works on clones so
        // a rebuilt statement reproduces the same parameter names.
        let mut counter = 0;
        let sets = self.sets.clone();
        let mut stmt = stmt::Update::new(self.base.table, alias.clone());
        for (column, expr) in sets {
            let expr = self.base.rewrite_literals(expr, &mut counter);
            stmt.set(column, expr);
        }

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

    /// Map the entity's changed fields and execute.
    ///
    /// The WHERE clause matches the key columns and, when the table is
    /// versioned, the entity's current version; the version column is
    /// incremented in the same statement. Zero affected rows on a versioned
    /// table is an optimistic-lock conflict and leaves the in-memory version
    /// untouched.
    pub fn submit(&mut self, entity: &mut T, conn: &mut dyn Connection) -> Result<u64> {
        let db = self.base.db;
        let mapping = db.mappings.of::<T>()?;

        if let Some(hook) = &mapping.hooks.pre_update {
            hook(entity)?;
        }

        let marks = mapping.marks_of(&*entity)?;
        let alias = self.base.alias.clone();
        let mut stmt = stmt::Update::new(self.base.table, alias.clone());

        for field in &mapping.fields {
            if field.is_virtual || field.key || field.version {
                continue;
            }
            let value = field.read(&*entity)?;
            let include = match &marks {
                Some(marks) => marks
                    .iter()
                    .any(|mark| mark.eq_ignore_ascii_case(&field.alias)),
                None => !value.is_unset() || field.keep_zero,
            };
            if include {
                stmt.set(field.column, value);
            }
        }

        for (column, expr) in &self.sets {
            stmt.set(*column, expr.clone());
        }

        if stmt.assignments.is_empty() {
            return Ok(0);
        }

        let mut parts = Vec::new();
        if mapping.key_fields().next().is_none() {
            return Err(Error::missing_key(format!(
                "entity `{}` has no key fields mapped",
                mapping.entity_name
            )));
        }
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

        let mut old_version = None;
        if let Some(field) = mapping.version_field() {
            let value = field.read(&*entity)?;
            if value.is_unset() {
                return Err(Error::missing_key(format!(
                    "entity `{}` has no version value; was it ever inserted?",
                    mapping.entity_name
                )));
            }
            let version = value.to_i64()?;
            parts.push(Expr::eq(
                Expr::column_with_alias(field.column, alias.clone()),
                value,
            ));
            stmt.set(field.column, Value::from(version + 1));
            old_version = Some(version);
        }

        stmt.filter = self.base.build_filter(parts);

        let rendered = self.base.render(&Statement::from(stmt))?;
        let affected = self.base.run_exec(conn, &rendered)?;

        if affected == 0 && old_version.is_some() {
            return Err(Error::optimistic_lock(format!(
                "`{}` was updated or deleted by another transaction",
                mapping.entity_name
            )));
        }

        if let (Some(field), Some(version)) = (mapping.version_field(), old_version) {
            field.write(&mut *entity, Value::from(version + 1))?;
        }
        mapping.clear_marks(entity)?;

        if let Some(hook) = &mapping.hooks.post_update {
            hook(entity)?;
        }
        Ok(affected)
    }

    /// Updates cannot join, so virtual column references have nowhere to
    /// resolve.
    fn assert_physical(&self) -> Result<()> {
        for filter in &self.base.filters {
            if let Some(column) = self.base.find_virtual(filter) {
                let column = self.base.db.registry.column(column);
                return Err(Error::validation(format!(
                    "virtual column `{}` cannot be referenced in an UPDATE",
                    column.name
                )));
            }
        }
        Ok(())
    }
}
