#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

// Fragment renderers
mod expr;
mod statement;

use crate::Translator;

use trellis_core::schema::{ColumnId, Registry, TableId};
use trellis_core::stmt::{Params, Statement, StmtKind, Value};
use trellis_core::{Error, Result};

/// One positional argument slot of a rendered statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgSlot {
    /// Resolved against the statement's bound parameters at execution time.
    Param(String),

    /// Fixed at render time (e.g. a discriminator constant).
    Value(Value),
}

/// Rendered SQL plus the argument slots its placeholders refer to, in
/// placeholder order.
///
/// The SQL string is stable across re-executions; only [`bind`](Self::bind)
/// runs again when the caller re-binds parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub args: Vec<ArgSlot>,
}

impl Rendered {
    /// Resolve the argument slots against `params` into the positional
    /// argument list a connection expects.
    pub fn bind(&self, params: &Params) -> Result<Vec<Value>> {
        let mut out = Vec::with_capacity(self.args.len());

        for slot in &self.args {
            match slot {
                ArgSlot::Param(name) => match params.get(name) {
                    Some(value) => out.push(value.clone()),
                    None => return Err(Error::unbound_param(name.clone())),
                },
                ArgSlot::Value(value) => out.push(value.clone()),
            }
        }

        Ok(out)
    }
}

/// Renders statements to dialect SQL.
pub struct Renderer<'a> {
    /// Schema the statement's IDs resolve against
    registry: &'a Registry,

    /// The dialect seam
    translator: &'a dyn Translator,
}

struct Formatter<'a> {
    /// Handle to the renderer
    renderer: &'a Renderer<'a>,

    /// Where to write the rendered SQL
    dst: &'a mut String,

    /// Argument slots, in placeholder order
    args: &'a mut Vec<ArgSlot>,

    /// Statement kind being rendered, passed through to the translator
    kind: StmtKind,

    /// True when column references render qualified by their table alias.
    /// UPDATE and DELETE declare no alias, so their columns render bare.
    qualify: bool,

    /// First error raised by a fragment. Rendering keeps going but the
    /// output is discarded.
    failure: Option<Error>,
}

impl<'a> Renderer<'a> {
    pub fn new(registry: &'a Registry, translator: &'a dyn Translator) -> Renderer<'a> {
        Renderer {
            registry,
            translator,
        }
    }

    pub fn render(&self, stmt: &Statement) -> Result<Rendered> {
        let mut sql = String::new();
        let mut args = vec![];

        let mut f = Formatter {
            renderer: self,
            dst: &mut sql,
            args: &mut args,
            kind: stmt.kind(),
            qualify: matches!(stmt.kind(), StmtKind::Select),
            failure: None,
        };

        stmt.to_sql(&mut f);

        if let Some(err) = f.failure {
            return Err(err);
        }

        if let Statement::Select(select) = stmt {
            if select.is_paginated() {
                sql = self.translator.paginate(select, sql);
            }
        }

        Ok(Rendered { sql, args })
    }

    fn table_name(&self, id: impl Into<TableId>) -> String {
        self.translator.table_name(self.registry.table(id))
    }

    fn column_name(&self, id: ColumnId) -> String {
        self.translator.column_name(self.registry.column(id))
    }

    fn registry(&self) -> &'a Registry {
        self.registry
    }
}

impl Formatter<'_> {
    fn fail(&mut self, err: Error) {
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }
}
