use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: TableId,

    pub alias: String,

    pub filter: Option<Expr>,
}

impl Delete {
    pub fn new(table: TableId, alias: impl Into<String>) -> Delete {
        Delete {
            table,
            alias: alias.into(),
            filter: None,
        }
    }

    pub fn and_filter(&mut self, expr: impl Into<Expr>) {
        match &mut self.filter {
            Some(filter) => filter.push_and(expr),
            None => self.filter = Some(expr.into()),
        }
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Statement::Delete(value)
    }
}
