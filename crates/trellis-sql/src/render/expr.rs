use super::{ArgSlot, Comma, Delimited, Formatter, ToSql};

use trellis_core::stmt::{BinaryOp, Expr, ExprStmt, StmtKind};

impl ToSql for &Expr {
    fn to_sql(self, f: &mut Formatter<'_>) {
        use Expr::*;

        match self {
            And(expr) => {
                // OR binds looser than AND; parenthesize OR operands.
                let mut s = "";
                for operand in &expr.operands {
                    fmt!(f, s);
                    if matches!(operand, Or(_)) {
                        fmt!(f, "(" operand ")");
                    } else {
                        fmt!(f, operand);
                    }
                    s = " AND ";
                }
            }
            Between(expr) => {
                let kw = if expr.not {
                    " NOT BETWEEN "
                } else {
                    " BETWEEN "
                };
                fmt!(f, &*expr.expr kw expr.low " AND " expr.high);
            }
            BinaryOp(expr) => {
                let op = match f.renderer.translator.binary_operator(f.kind, expr.op) {
                    Ok(op) => op,
                    Err(err) => return f.fail(err),
                };

                binary_operand(f, expr.op, &expr.lhs);
                fmt!(f, " " op " ");
                binary_operand(f, expr.op, &expr.rhs);
            }
            Case(expr) => {
                fmt!(f, "CASE");
                for when in &expr.whens {
                    fmt!(f, " WHEN " when.condition " THEN " when.result);
                }
                if let Some(otherwise) = &expr.otherwise {
                    fmt!(f, " ELSE " otherwise);
                }
                fmt!(f, " END");
            }
            Column(expr) => {
                let name = f.renderer.column_name(expr.column);

                match (&expr.table_alias, f.qualify) {
                    (Some(alias), true) => {
                        let alias = f.renderer.translator.ident(alias);
                        fmt!(f, alias "." name);
                    }
                    _ => fmt!(f, name),
                }
            }
            Exists(expr) => {
                if expr.not {
                    fmt!(f, "NOT ");
                }
                fmt!(f, "EXISTS ");
                subquery(f, &expr.query);
            }
            Func(expr) => {
                let name = match f.renderer.translator.function(expr.func) {
                    Ok(name) => name,
                    Err(err) => return f.fail(err),
                };

                if expr.args.is_empty() {
                    fmt!(f, name "(*)");
                } else {
                    fmt!(f, name "(" Comma(&expr.args) ")");
                }
            }
            InList(expr) => {
                let kw = if expr.not { " NOT IN (" } else { " IN (" };
                fmt!(f, &*expr.expr kw Comma(&expr.list) ")");
            }
            InSubquery(expr) => {
                let kw = if expr.not { " NOT IN " } else { " IN " };
                fmt!(f, &*expr.expr kw);
                subquery(f, &expr.query);
            }
            IsNull(expr) => {
                let kw = if expr.not { " IS NOT NULL" } else { " IS NULL" };
                fmt!(f, &*expr.expr kw);
            }
            Like(expr) => {
                let kw = if expr.not { " NOT LIKE " } else { " LIKE " };

                if expr.insensitive {
                    fmt!(f, "LOWER(" expr.expr ")" kw "LOWER(" expr.pattern ")");
                } else {
                    fmt!(f, &*expr.expr kw expr.pattern);
                }
            }
            Not(expr) => {
                fmt!(f, "NOT (" expr.operand ")");
            }
            Or(expr) => {
                fmt!(f, Delimited(&expr.operands, " OR "));
            }
            Param(expr) => {
                f.args.push(ArgSlot::Param(expr.name.clone()));
                let placeholder = Placeholder {
                    index: f.args.len(),
                    name: &expr.name,
                };
                fmt!(f, placeholder);
            }
            Stmt(expr) => {
                subquery(f, expr);
            }
            Value(value) => {
                f.args.push(ArgSlot::Value(value.clone()));
                let placeholder = Placeholder {
                    index: f.args.len(),
                    name: "",
                };
                fmt!(f, placeholder);
            }
        }
    }
}

pub(super) struct Placeholder<'a> {
    pub(super) index: usize,
    pub(super) name: &'a str,
}

impl ToSql for Placeholder<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let s = f.renderer.translator.placeholder(self.index, self.name);
        f.dst.push_str(&s);
    }
}

fn binary_operand(f: &mut Formatter<'_>, parent: BinaryOp, operand: &Expr) {
    // Nested arithmetic keeps its grouping; comparisons never nest.
    if parent.is_arithmetic() && matches!(operand, Expr::BinaryOp(_)) {
        fmt!(f, "(" operand ")");
    } else {
        fmt!(f, operand);
    }
}

/// Render an embedded sub-statement, parenthesized, with its own alias
/// space and pagination.
pub(super) fn subquery(f: &mut Formatter<'_>, query: &ExprStmt) {
    let mut sql = String::new();

    let failure = {
        let mut sub = Formatter {
            renderer: f.renderer,
            dst: &mut sql,
            args: &mut *f.args,
            kind: StmtKind::Select,
            qualify: true,
            failure: None,
        };

        (&*query.stmt).to_sql(&mut sub);
        sub.failure
    };

    if let Some(err) = failure {
        return f.fail(err);
    }

    if query.stmt.is_paginated() {
        sql = f.renderer.translator.paginate(&query.stmt, sql);
    }

    f.dst.push('(');
    f.dst.push_str(&sql);
    f.dst.push(')');
}
