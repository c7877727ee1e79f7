use super::*;

/// A reference to a table column.
///
/// The alias is optional at build time: filters are usually written against
/// the root table and qualified later, once join resolution has assigned
/// aliases. [`Expr::set_table_alias`] fills in the blanks without touching
/// references the caller bound explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprColumn {
    pub column: ColumnId,
    pub table_alias: Option<String>,
}

impl Expr {
    pub fn column(column: impl Into<ColumnId>) -> Expr {
        ExprColumn {
            column: column.into(),
            table_alias: None,
        }
        .into()
    }

    pub fn column_with_alias(column: impl Into<ColumnId>, alias: impl Into<String>) -> Expr {
        ExprColumn {
            column: column.into(),
            table_alias: Some(alias.into()),
        }
        .into()
    }
}

impl ExprColumn {
    pub fn references(&self, column: ColumnId) -> bool {
        self.column == column
    }
}

impl From<ColumnId> for Expr {
    fn from(value: ColumnId) -> Self {
        Expr::column(value)
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Expr::Column(value)
    }
}
