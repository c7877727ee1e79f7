use crate::db::Db;

use trellis_core::{
    driver::Connection,
    schema::{ColumnId, TableId},
    stmt::{
        visit, visit_mut, Expr, ExprColumn, ExprParam, ExprStmt, Params, Statement, Visit,
        VisitMut,
    },
    Result,
};
use trellis_sql::{Rendered, Renderer};

/// State shared by the four statement builders: the target table, its alias,
/// pending filters, and the named parameter map.
///
/// Mutating any directive drops the builder's rendered-SQL cache; re-binding
/// a parameter does not, which is what makes re-executing a built statement
/// with fresh values cheap.
pub(crate) struct DmlBase<'a> {
    pub(crate) db: &'a Db,
    pub(crate) table: TableId,
    pub(crate) alias: String,
    pub(crate) filters: Vec<Expr>,
    pub(crate) params: Params,
}

impl<'a> DmlBase<'a> {
    pub(crate) fn new(db: &'a Db, table: TableId) -> DmlBase<'a> {
        let alias = db.registry.table(table).alias.clone();
        DmlBase {
            db,
            table,
            alias,
            filters: Vec::new(),
            params: Params::new(),
        }
    }

    /// Move literal values out of an expression into the named parameter map.
    ///
    /// Names are the base alias plus `_R` and a counter; the counter restarts
    /// on every build, so a rebuilt statement reproduces the same names for
    /// the same directives. Embedded sub-statements are left alone except for
    /// their frozen parameter maps, which are folded into this one (colliding
    /// names renamed, references inside the sub-select updated to match).
    pub(crate) fn rewrite_literals(&mut self, mut expr: Expr, counter: &mut usize) -> Expr {
        let mut rewrite = RewriteLiterals {
            alias: &self.alias,
            counter,
            params: &mut self.params,
            in_sub: false,
        };
        rewrite.visit_expr_mut(&mut expr);
        expr
    }

    /// Discriminator predicates of the base table, bound to the base alias.
    /// Every statement touching a discriminated table carries these, whether
    /// or not the caller supplied filters of their own.
    pub(crate) fn discriminator_filters(&self) -> Vec<Expr> {
        self.db
            .registry
            .table(self.table)
            .discriminators
            .iter()
            .map(|disc| {
                Expr::eq(
                    Expr::column_with_alias(disc.column, self.alias.clone()),
                    disc.value.clone(),
                )
            })
            .collect()
    }

    /// AND together discriminators, accumulated filters (bound to the base
    /// alias), and any extra predicates.
    pub(crate) fn build_filter(&self, extra: Vec<Expr>) -> Option<Expr> {
        let mut parts = self.discriminator_filters();
        parts.extend(extra);
        for filter in &self.filters {
            let mut filter = filter.clone();
            filter.set_table_alias(&self.alias);
            parts.push(filter);
        }
        if parts.is_empty() {
            None
        } else {
            Some(Expr::and(parts))
        }
    }

    pub(crate) fn render(&self, stmt: &Statement) -> Result<Rendered> {
        Renderer::new(&self.db.registry, self.db.translator.as_ref()).render(stmt)
    }

    pub(crate) fn run_exec(&self, conn: &mut dyn Connection, rendered: &Rendered) -> Result<u64> {
        let args = rendered.bind(&self.params)?;
        conn.exec(&rendered.sql, &args)
    }

    /// The first virtual column referenced by the expression, if any.
    pub(crate) fn find_virtual(&self, expr: &Expr) -> Option<ColumnId> {
        let mut scan = FindVirtual {
            base: self,
            found: None,
        };
        scan.visit_expr(expr);
        scan.found
    }
}

struct RewriteLiterals<'p> {
    alias: &'p str,
    counter: &'p mut usize,
    params: &'p mut Params,
    in_sub: bool,
}

impl VisitMut for RewriteLiterals<'_> {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        if !self.in_sub {
            if let Expr::Value(value) = i {
                *self.counter += 1;
                let name = format!("{}_R{}", self.alias, self.counter);
                self.params.bind(name.clone(), value.clone());
                *i = Expr::param(name);
                return;
            }
        }
        visit_mut::visit_expr_mut(self, i);
    }

    // Sub-statements keep their literals; only their parameter maps merge
    // into the outer statement. Inner maps are absorbed before outer ones,
    // so a name bound at two depths renames the shallower binding and the
    // references each level carries still point at their own value.
    fn visit_expr_stmt_mut(&mut self, i: &mut ExprStmt) {
        let outermost = !std::mem::replace(&mut self.in_sub, true);
        visit_mut::visit_expr_stmt_mut(self, i);
        if outermost {
            self.in_sub = false;
        }

        let params = std::mem::take(&mut i.params);
        let renames = self.params.absorb(params);
        if !renames.is_empty() {
            let mut rename = RenameParams { renames: &renames };
            rename.visit_select_mut(&mut i.stmt);
        }
    }
}

struct RenameParams<'p> {
    renames: &'p [(String, String)],
}

impl VisitMut for RenameParams<'_> {
    fn visit_expr_param_mut(&mut self, i: &mut ExprParam) {
        if let Some((_, to)) = self.renames.iter().find(|(from, _)| *from == i.name) {
            i.name = to.clone();
        }
    }
}

struct FindVirtual<'p> {
    base: &'p DmlBase<'p>,
    found: Option<ColumnId>,
}

impl Visit for FindVirtual<'_> {
    fn visit_expr_column(&mut self, i: &ExprColumn) {
        if self.found.is_none() && self.base.db.registry.column(i.column).is_virtual() {
            self.found = Some(i.column);
        }
        visit::visit_expr_column(self, i);
    }
}

/// Replaces references to one virtual column with the physical column it
/// reaches through its association, qualified with the resolved join alias.
pub(crate) struct SwapColumn<'p> {
    pub(crate) from: ColumnId,
    pub(crate) to: ColumnId,
    pub(crate) alias: &'p str,
}

impl VisitMut for SwapColumn<'_> {
    fn visit_expr_column_mut(&mut self, i: &mut ExprColumn) {
        if i.column == self.from {
            i.column = self.to;
            i.table_alias = Some(self.alias.to_string());
        }
    }
}
