use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Table the FROM clause names.
    pub table: TableId,

    /// Alias bound to the base table.
    pub alias: String,

    /// Projection, in output order.
    pub items: Vec<SelectItem>,

    /// Physical joins, in resolution order.
    pub joins: Vec<JoinHop>,

    pub filter: Option<Expr>,

    pub order_by: Vec<OrderByExpr>,

    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Select {
    pub fn new(table: TableId, alias: impl Into<String>) -> Select {
        Select {
            table,
            alias: alias.into(),
            items: vec![],
            joins: vec![],
            filter: None,
            order_by: vec![],
            limit: None,
            offset: None,
        }
    }

    /// AND `expr` onto the filter, installing it as the filter when none is
    /// set yet.
    pub fn and_filter(&mut self, expr: impl Into<Expr>) {
        match &mut self.filter {
            Some(filter) => filter.push_and(expr),
            None => self.filter = Some(expr.into()),
        }
    }

    pub fn is_paginated(&self) -> bool {
        self.limit.is_some() || self.offset.is_some()
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}
