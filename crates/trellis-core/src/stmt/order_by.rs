use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub desc: bool,
}

impl OrderByExpr {
    pub fn asc(expr: impl Into<Expr>) -> OrderByExpr {
        OrderByExpr {
            expr: expr.into(),
            desc: false,
        }
    }

    pub fn desc(expr: impl Into<Expr>) -> OrderByExpr {
        OrderByExpr {
            expr: expr.into(),
            desc: true,
        }
    }
}

impl<T: Into<Expr>> From<T> for OrderByExpr {
    fn from(value: T) -> Self {
        OrderByExpr::asc(value)
    }
}
