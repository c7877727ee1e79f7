use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub expr: Box<Expr>,
    pub list: Vec<Expr>,
    pub not: bool,
}

impl Expr {
    pub fn in_list<T>(expr: impl Into<Expr>, list: T) -> Expr
    where
        T: IntoIterator,
        T::Item: Into<Expr>,
    {
        ExprInList {
            expr: Box::new(expr.into()),
            list: list.into_iter().map(Into::into).collect(),
            not: false,
        }
        .into()
    }

    pub fn not_in_list<T>(expr: impl Into<Expr>, list: T) -> Expr
    where
        T: IntoIterator,
        T::Item: Into<Expr>,
    {
        ExprInList {
            expr: Box::new(expr.into()),
            list: list.into_iter().map(Into::into).collect(),
            not: true,
        }
        .into()
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Expr::InList(value)
    }
}
