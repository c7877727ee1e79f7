use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprInSubquery {
    pub expr: Box<Expr>,
    pub query: Box<ExprStmt>,
    pub not: bool,
}

impl Expr {
    pub fn in_subquery(expr: impl Into<Expr>, query: impl Into<ExprStmt>) -> Expr {
        ExprInSubquery {
            expr: Box::new(expr.into()),
            query: Box::new(query.into()),
            not: false,
        }
        .into()
    }

    pub fn not_in_subquery(expr: impl Into<Expr>, query: impl Into<ExprStmt>) -> Expr {
        ExprInSubquery {
            expr: Box::new(expr.into()),
            query: Box::new(query.into()),
            not: true,
        }
        .into()
    }
}

impl From<ExprInSubquery> for Expr {
    fn from(value: ExprInSubquery) -> Self {
        Expr::InSubquery(value)
    }
}
