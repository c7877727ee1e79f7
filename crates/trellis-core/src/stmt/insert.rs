use super::*;

/// A single-row INSERT.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: TableId,

    /// Columns receiving a value, in render order.
    pub columns: Vec<ColumnId>,

    /// One expression per column in `columns`.
    pub values: Vec<Expr>,

    /// Key column to return from the insert, for translators whose
    /// auto-key strategy is a RETURNING clause.
    pub returning: Option<ColumnId>,
}

impl Insert {
    pub fn new(table: TableId) -> Insert {
        Insert {
            table,
            columns: vec![],
            values: vec![],
            returning: None,
        }
    }

    pub fn set(&mut self, column: ColumnId, value: impl Into<Expr>) {
        debug_assert_eq!(column.table, self.table);

        // Re-setting a column replaces its value rather than duplicating the
        // column in the render list.
        if let Some(pos) = self.columns.iter().position(|c| *c == column) {
            self.values[pos] = value.into();
        } else {
            self.columns.push(column);
            self.values.push(value.into());
        }
    }

    pub fn value_of(&self, column: ColumnId) -> Option<&Expr> {
        let pos = self.columns.iter().position(|c| *c == column)?;
        Some(&self.values[pos])
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}
