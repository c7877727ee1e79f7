use super::*;

/// One `SET column = value` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: ColumnId,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: TableId,

    pub alias: String,

    pub assignments: Vec<Assignment>,

    pub filter: Option<Expr>,
}

impl Update {
    pub fn new(table: TableId, alias: impl Into<String>) -> Update {
        Update {
            table,
            alias: alias.into(),
            assignments: vec![],
            filter: None,
        }
    }

    pub fn set(&mut self, column: ColumnId, value: impl Into<Expr>) {
        debug_assert_eq!(column.table, self.table);

        if let Some(existing) = self.assignments.iter_mut().find(|a| a.column == column) {
            existing.value = value.into();
        } else {
            self.assignments.push(Assignment {
                column,
                value: value.into(),
            });
        }
    }

    pub fn assignment_of(&self, column: ColumnId) -> Option<&Expr> {
        self.assignments
            .iter()
            .find(|a| a.column == column)
            .map(|a| &a.value)
    }

    pub fn and_filter(&mut self, expr: impl Into<Expr>) {
        match &mut self.filter {
            Some(filter) => filter.push_and(expr),
            None => self.filter = Some(expr.into()),
        }
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}
