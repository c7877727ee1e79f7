use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprIsNull {
    pub expr: Box<Expr>,
    pub not: bool,
}

impl Expr {
    pub fn is_null(expr: impl Into<Expr>) -> Expr {
        ExprIsNull {
            expr: Box::new(expr.into()),
            not: false,
        }
        .into()
    }

    pub fn is_not_null(expr: impl Into<Expr>) -> Expr {
        ExprIsNull {
            expr: Box::new(expr.into()),
            not: true,
        }
        .into()
    }
}

impl From<ExprIsNull> for Expr {
    fn from(value: ExprIsNull) -> Self {
        Expr::IsNull(value)
    }
}
