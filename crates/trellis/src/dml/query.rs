use super::base::{DmlBase, SwapColumn};
use crate::db::Db;
use crate::join::{JoinStep, ResolvedHop, Resolver};
use crate::load;

use trellis_core::{
    driver::{Connection, Rows},
    err,
    schema::{ColumnId, TableId},
    stmt::{Expr, OrderByExpr, Params, Select, SelectItem, Statement, Value, VisitMut},
    Error, Result,
};
use trellis_sql::Rendered;

use indexmap::IndexMap;

use std::collections::HashSet;
use std::marker::PhantomData;

/// Builds a SELECT over an entity's table.
///
/// Directives accumulate and are resolved in one pass the first time the
/// statement is needed; the rendered SQL is cached until a directive changes
/// it. Parameters can be re-bound between executions without a rebuild.
pub struct Query<'a, T> {
    base: DmlBase<'a>,
    joins: Vec<JoinDirective>,
    columns: Vec<ColumnId>,
    order: Vec<(ColumnId, bool)>,
    limit: Option<u64>,
    offset: Option<u64>,
    reuse: bool,
    resolved: Option<Resolved>,
    _entity: PhantomData<fn() -> T>,
}

/// One requested join chain: a dot-separated path of association names
/// starting at the base table, e.g. `"books.authors"`.
#[derive(Clone)]
pub struct JoinDirective {
    pub(crate) path: String,
    pub(crate) inner: bool,
    pub(crate) fetch: bool,
    pub(crate) alias: Option<String>,
    pub(crate) filter: Option<Expr>,
    pub(crate) columns: Vec<String>,
}

impl JoinDirective {
    fn new(path: &str, inner: bool, fetch: bool) -> JoinDirective {
        JoinDirective {
            path: path.to_string(),
            inner,
            fetch,
            alias: None,
            filter: None,
            columns: Vec::new(),
        }
    }

    /// Force an INNER join for every hop of the chain.
    pub fn inner(&mut self) -> &mut Self {
        self.inner = true;
        self
    }

    /// Use a LEFT OUTER join for every hop of the chain.
    pub fn outer(&mut self) -> &mut Self {
        self.inner = false;
        self
    }

    /// Preferred alias for the chain's destination table.
    pub fn alias(&mut self, alias: &str) -> &mut Self {
        self.alias = Some(alias.to_string());
        self
    }

    /// Extra predicate for the destination, merged into the final hop's ON
    /// clause. Unqualified column references bind to the destination alias.
    pub fn filter(&mut self, expr: Expr) -> &mut Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => Expr::and([existing, expr]),
            None => expr,
        });
        self
    }

    /// Extra destination columns to project, by column name.
    pub fn columns(&mut self, names: &[&str]) -> &mut Self {
        self.columns.extend(names.iter().map(|name| name.to_string()));
        self
    }
}

struct Resolved {
    select: Select,
    rendered: Rendered,
    /// Fetch chains, in request order; the crawler is built from these.
    chains: Vec<Vec<ResolvedHop>>,
}

impl<'a, T: Default + Clone + 'static> Query<'a, T> {
    pub(crate) fn new(db: &'a Db) -> Result<Query<'a, T>> {
        let table = db.mappings.of::<T>()?.table;
        Ok(Query {
            base: DmlBase::new(db, table),
            joins: Vec::new(),
            columns: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
            reuse: false,
            resolved: None,
            _entity: PhantomData,
        })
    }

    /// Re-alias the base table. Every alias previously minted for a join is
    /// discarded with the statement cache and re-minted on the next build.
    pub fn base_alias(&mut self, alias: &str) -> &mut Self {
        self.base.alias = alias.to_string();
        self.invalidate()
    }

    /// AND a predicate into the WHERE clause. Unqualified column references
    /// bind to the base alias; literal values become named parameters.
    pub fn filter(&mut self, expr: Expr) -> &mut Self {
        self.base.filters.push(expr);
        self.invalidate()
    }

    /// Bind (or re-bind) a named parameter. Does not invalidate the cached
    /// SQL.
    pub fn bind(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.base.params.bind(name, value);
        self
    }

    /// Project a specific column instead of the default full physical column
    /// set of the base table. Virtual columns resolve through their implicit
    /// join.
    pub fn column(&mut self, column: impl Into<ColumnId>) -> &mut Self {
        self.columns.push(column.into());
        self.invalidate()
    }

    /// Join the chain for filtering only; its rows are not fetched into
    /// entities. Defaults to INNER.
    pub fn join(&mut self, path: &str) -> &mut JoinDirective {
        self.push_join(JoinDirective::new(path, true, false))
    }

    /// Join the chain and fetch its destination entities into the tree.
    /// Defaults to LEFT OUTER so parents without children survive.
    pub fn fetch(&mut self, path: &str) -> &mut JoinDirective {
        self.push_join(JoinDirective::new(path, false, true))
    }

    fn push_join(&mut self, directive: JoinDirective) -> &mut JoinDirective {
        self.resolved = None;
        let index = self.joins.len();
        self.joins.push(directive);
        &mut self.joins[index]
    }

    pub fn order_by(&mut self, column: impl Into<ColumnId>) -> &mut Self {
        self.order.push((column.into(), false));
        self.invalidate()
    }

    pub fn order_by_desc(&mut self, column: impl Into<ColumnId>) -> &mut Self {
        self.order.push((column.into(), true));
        self.invalidate()
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self.invalidate()
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.offset = Some(offset);
        self.invalidate()
    }

    /// Collapse duplicate rows produced by outer-join fan-out onto one entity
    /// per key, instead of one entity per row.
    pub fn reuse(&mut self, reuse: bool) -> &mut Self {
        self.reuse = reuse;
        self
    }

    pub fn params(&self) -> &Params {
        &self.base.params
    }

    /// The finalized SQL for this statement.
    pub fn sql(&mut self) -> Result<&str> {
        self.finalize()?;
        Ok(&self.resolved()?.rendered.sql)
    }

    /// Execute and hand the raw rows back.
    pub fn rows(&mut self, conn: &mut dyn Connection) -> Result<Rows> {
        self.finalize()?;
        let resolved = self.resolved()?;
        let args = resolved.rendered.bind(&self.base.params)?;
        conn.query(&resolved.rendered.sql, &args)
    }

    /// Execute and transform into entities, one per row (or one per key when
    /// [`reuse`](Query::reuse) is set).
    pub fn list(&mut self, conn: &mut dyn Connection) -> Result<Vec<T>> {
        let reuse = self.reuse;
        let rows = self.rows(conn)?;
        let resolved = self.resolved()?;
        load::transform::<T>(
            &self.base.db.mappings,
            &self.base.alias,
            &resolved.chains,
            reuse,
            rows,
        )
    }

    /// Execute in reuse mode: duplicate rows collapse and each root comes
    /// back once, with its fetched children attached.
    pub fn list_tree(&mut self, conn: &mut dyn Connection) -> Result<Vec<T>> {
        let rows = self.rows(conn)?;
        let resolved = self.resolved()?;
        load::transform::<T>(
            &self.base.db.mappings,
            &self.base.alias,
            &resolved.chains,
            true,
            rows,
        )
    }

    pub fn first(&mut self, conn: &mut dyn Connection) -> Result<Option<T>> {
        Ok(self.list(conn)?.into_iter().next())
    }

    /// COUNT(*) over the same joins and filters, ignoring ordering and
    /// pagination.
    pub fn count(&mut self, conn: &mut dyn Connection) -> Result<i64> {
        self.finalize()?;
        let (sql, args) = {
            let resolved = self.resolved()?;
            let mut select = resolved.select.clone();
            select.items = vec![SelectItem::new(Expr::count_star())];
            select.order_by.clear();
            select.limit = None;
            select.offset = None;
            let rendered = self.base.render(&Statement::from(select))?;
            let args = rendered.bind(&self.base.params)?;
            (rendered.sql, args)
        };
        let rows = conn.query(&sql, &args)?;
        match rows.scalar() {
            Some(value) => value.to_i64(),
            None => Ok(0),
        }
    }

    pub fn exists(&mut self, conn: &mut dyn Connection) -> Result<bool> {
        Ok(self.count(conn)? > 0)
    }

    fn invalidate(&mut self) -> &mut Self {
        self.resolved = None;
        self
    }

    fn resolved(&self) -> Result<&Resolved> {
        match &self.resolved {
            Some(resolved) => Ok(resolved),
            None => Err(err!("statement was not finalized")),
        }
    }

    fn finalize(&mut self) -> Result<()> {
        if self.resolved.is_none() {
            let resolved = self.build()?;
            self.resolved = Some(resolved);
        }
        Ok(())
    }

    /// One-pass resolution of every pending directive into a rendered
    /// statement.
    fn build(&mut self) -> Result<Resolved> {
        let registry = &self.base.db.registry;
        let alias = self.base.alias.clone();

        // Literals first, in directive order, so parameter names are stable
        // across rebuilds. Directives keep their original form; the rewrite
        // works on clones.
        let mut counter = 0;
        let originals = self.base.filters.clone();
        let filters: Vec<Expr> = originals
            .into_iter()
            .map(|filter| self.base.rewrite_literals(filter, &mut counter))
            .collect();

        let mut join_dirs = self.joins.clone();
        for directive in &mut join_dirs {
            if let Some(filter) = directive.filter.take() {
                directive.filter = Some(self.base.rewrite_literals(filter, &mut counter));
            }
        }

        // Name paths become association chains before any alias is minted.
        let mut chains = Vec::with_capacity(join_dirs.len());
        for directive in &join_dirs {
            chains.push((self.chain_of(directive)?, directive.fetch));
        }

        let mut resolver = Resolver::new(registry, &alias);

        // Caller-preferred aliases go into the bag up front, so a chain
        // resolved before the aliased directive still lands on the caller's
        // name.
        for (steps, _) in &chains {
            if let Some(step) = steps.last() {
                if let Some(preferred) = &step.alias {
                    resolver.bag_mut().put(step.assoc, step.inner, preferred.clone());
                }
            }
        }

        let mut fetch_chains = Vec::new();
        let mut extra_columns: Vec<(String, ColumnId)> = Vec::new();
        for (steps, fetch) in &chains {
            let resolved = resolver.resolve(steps)?;
            for (step, hop) in steps.iter().zip(&resolved) {
                for column in &step.columns {
                    extra_columns.push((hop.to_alias.clone(), *column));
                }
            }
            if *fetch {
                fetch_chains.push(resolved);
            }
        }

        // Filters referencing virtual columns pull in their implicit joins.
        let mut where_extra = Vec::with_capacity(filters.len());
        for filter in filters {
            where_extra.push(self.resolve_virtual(filter, &mut resolver)?);
        }

        let table = registry.table(self.base.table);
        let mut items = Vec::new();
        let mut seen = HashSet::new();

        if self.columns.is_empty() {
            for column in table.physical_columns() {
                push_item(
                    &mut items,
                    &mut seen,
                    Expr::column_with_alias(column.id, alias.clone()),
                    format!("{}.{}", alias, column.alias),
                );
            }
        } else {
            for &column_id in &self.columns {
                let column = registry.column(column_id);
                if column.id.table != self.base.table {
                    return Err(Error::invalid_schema(format!(
                        "projected column `{}` does not belong to table `{}`",
                        column.name, table.name
                    )));
                }
                let label = format!("{}.{}", alias, column.alias);
                if let Some(virtual_ref) = &column.virtual_ref {
                    let chain = [JoinStep::new(virtual_ref.assoc)];
                    let resolved = resolver.resolve(&chain)?;
                    let hop = resolved.last().ok_or_else(|| {
                        Error::invalid_schema("virtual column resolved to an empty path")
                    })?;
                    push_item(
                        &mut items,
                        &mut seen,
                        Expr::column_with_alias(virtual_ref.column, hop.to_alias.clone()),
                        label,
                    );
                } else {
                    push_item(
                        &mut items,
                        &mut seen,
                        Expr::column_with_alias(column.id, alias.clone()),
                        label,
                    );
                }
            }
        }

        // Every hop of a fetch chain is fetched, so every level's columns are
        // selected. Shared prefixes de-duplicate via their labels.
        for chain in &fetch_chains {
            for hop in chain {
                let target = registry.table(registry.assoc(hop.assoc).to);
                for column in target.physical_columns() {
                    push_item(
                        &mut items,
                        &mut seen,
                        Expr::column_with_alias(column.id, hop.to_alias.clone()),
                        format!("{}.{}", hop.to_alias, column.alias),
                    );
                }
            }
        }

        for (hop_alias, column_id) in extra_columns {
            let column = registry.column(column_id);
            push_item(
                &mut items,
                &mut seen,
                Expr::column_with_alias(column_id, hop_alias.clone()),
                format!("{}.{}", hop_alias, column.alias),
            );
        }

        // Aliases by table, for ORDER BY references; first resolution wins.
        let mut table_alias: IndexMap<TableId, String> = IndexMap::new();
        table_alias.insert(self.base.table, alias.clone());
        for hop in resolver.hops() {
            let to = registry.assoc(hop.assoc).to;
            table_alias.entry(to).or_insert_with(|| hop.to_alias.clone());
        }

        let mut order_by = Vec::with_capacity(self.order.len());
        for (column_id, desc) in &self.order {
            let column = registry.column(*column_id);
            let order_alias = table_alias.get(&column.id.table).ok_or_else(|| {
                Error::invalid_schema(format!(
                    "ORDER BY column `{}` belongs to a table that is not joined",
                    column.name
                ))
            })?;
            let expr = Expr::column_with_alias(*column_id, order_alias.clone());
            order_by.push(if *desc {
                OrderByExpr::desc(expr)
            } else {
                OrderByExpr::asc(expr)
            });
        }

        let mut select = Select::new(self.base.table, alias.clone());
        select.items = items;
        select.order_by = order_by;
        select.limit = self.limit;
        select.offset = self.offset;

        let mut parts = self.base.discriminator_filters();
        for mut filter in where_extra {
            filter.set_table_alias(&alias);
            parts.push(filter);
        }
        if !parts.is_empty() {
            select.filter = Some(Expr::and(parts));
        }

        select.joins = resolver.into_hops();

        let stmt = Statement::from(select.clone());
        let rendered = self.base.render(&stmt)?;

        Ok(Resolved {
            select,
            rendered,
            chains: fetch_chains,
        })
    }

    /// Resolve a directive's dot-path into association identities, carrying
    /// the directive's options on the final hop.
    fn chain_of(&self, directive: &JoinDirective) -> Result<Vec<JoinStep>> {
        let registry = &self.base.db.registry;
        let count = directive.path.split('.').count();
        let mut steps = Vec::with_capacity(count);
        let mut at = self.base.table;

        for (index, name) in directive.path.split('.').enumerate() {
            let table = registry.table(at);
            let assoc_id = table.assoc_named(name).ok_or_else(|| {
                Error::invalid_schema(format!(
                    "no association `{}` on table `{}`",
                    name, table.name
                ))
            })?;
            let assoc = registry.assoc(assoc_id);
            let last = index + 1 == count;

            let mut step = JoinStep::new(assoc_id);
            step.inner = directive.inner;
            if last {
                step.filter = directive.filter.clone();
                step.alias = directive.alias.clone();
                let target = registry.table(assoc.to);
                for column_name in &directive.columns {
                    let column = target.column_by_name(column_name).ok_or_else(|| {
                        Error::invalid_schema(format!(
                            "no column `{}` on table `{}`",
                            column_name, target.name
                        ))
                    })?;
                    step.columns.push(column.id);
                }
            }
            steps.push(step);
            at = assoc.to;
        }

        Ok(steps)
    }

    /// Rewrite references to the base table's virtual columns into their
    /// physical targets, resolving the implicit outer join on first use.
    fn resolve_virtual(&self, mut filter: Expr, resolver: &mut Resolver<'_>) -> Result<Expr> {
        let registry = &self.base.db.registry;
        while let Some(column_id) = self.base.find_virtual(&filter) {
            if column_id.table != self.base.table {
                return Err(Error::invalid_schema(
                    "virtual columns of joined tables cannot be referenced",
                ));
            }
            let column = registry.column(column_id);
            let virtual_ref = column.virtual_ref.clone().ok_or_else(|| {
                Error::invalid_schema(format!("column `{}` is not virtual", column.name))
            })?;
            let chain = [JoinStep::new(virtual_ref.assoc)];
            let resolved = resolver.resolve(&chain)?;
            let hop = resolved
                .last()
                .ok_or_else(|| Error::invalid_schema("virtual column resolved to an empty path"))?;
            let mut swap = SwapColumn {
                from: column_id,
                to: virtual_ref.column,
                alias: &hop.to_alias,
            };
            swap.visit_expr_mut(&mut filter);
        }
        Ok(filter)
    }
}

fn push_item(items: &mut Vec<SelectItem>, seen: &mut HashSet<String>, expr: Expr, label: String) {
    if seen.insert(label.clone()) {
        items.push(SelectItem::labeled(expr, label));
    }
}
