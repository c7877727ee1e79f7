use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBetween {
    pub expr: Box<Expr>,
    pub low: Box<Expr>,
    pub high: Box<Expr>,
    pub not: bool,
}

impl Expr {
    pub fn between(expr: impl Into<Expr>, low: impl Into<Expr>, high: impl Into<Expr>) -> Expr {
        ExprBetween {
            expr: Box::new(expr.into()),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            not: false,
        }
        .into()
    }

    pub fn not_between(expr: impl Into<Expr>, low: impl Into<Expr>, high: impl Into<Expr>) -> Expr {
        ExprBetween {
            expr: Box::new(expr.into()),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            not: true,
        }
        .into()
    }
}

impl From<ExprBetween> for Expr {
    fn from(value: ExprBetween) -> Self {
        Expr::Between(value)
    }
}
