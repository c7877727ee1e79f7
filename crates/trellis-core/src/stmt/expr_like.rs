use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprLike {
    pub expr: Box<Expr>,
    pub pattern: Box<Expr>,

    /// Case-insensitive match. Translators without a native `ILIKE` lower
    /// both sides instead.
    pub insensitive: bool,

    pub not: bool,
}

impl Expr {
    pub fn like(expr: impl Into<Expr>, pattern: impl Into<Expr>) -> Expr {
        ExprLike {
            expr: Box::new(expr.into()),
            pattern: Box::new(pattern.into()),
            insensitive: false,
            not: false,
        }
        .into()
    }

    pub fn not_like(expr: impl Into<Expr>, pattern: impl Into<Expr>) -> Expr {
        ExprLike {
            expr: Box::new(expr.into()),
            pattern: Box::new(pattern.into()),
            insensitive: false,
            not: true,
        }
        .into()
    }

    pub fn ilike(expr: impl Into<Expr>, pattern: impl Into<Expr>) -> Expr {
        ExprLike {
            expr: Box::new(expr.into()),
            pattern: Box::new(pattern.into()),
            insensitive: true,
            not: false,
        }
        .into()
    }
}

impl From<ExprLike> for Expr {
    fn from(value: ExprLike) -> Self {
        Expr::Like(value)
    }
}
