use super::*;

/// One projected expression in a SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub expr: Expr,

    /// Result-set label (`AS label`). Entity queries label every column
    /// `<table alias>.<column alias>` so scanned rows can be attributed to
    /// the join hop that produced them.
    pub label: Option<String>,
}

impl SelectItem {
    pub fn new(expr: impl Into<Expr>) -> SelectItem {
        SelectItem {
            expr: expr.into(),
            label: None,
        }
    }

    pub fn labeled(expr: impl Into<Expr>, label: impl Into<String>) -> SelectItem {
        SelectItem {
            expr: expr.into(),
            label: Some(label.into()),
        }
    }
}

impl<T: Into<Expr>> From<T> for SelectItem {
    fn from(value: T) -> Self {
        SelectItem::new(value)
    }
}
