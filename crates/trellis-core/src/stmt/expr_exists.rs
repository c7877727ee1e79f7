use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprExists {
    pub query: Box<ExprStmt>,
    pub not: bool,
}

impl Expr {
    pub fn exists(query: impl Into<ExprStmt>) -> Expr {
        ExprExists {
            query: Box::new(query.into()),
            not: false,
        }
        .into()
    }

    pub fn not_exists(query: impl Into<ExprStmt>) -> Expr {
        ExprExists {
            query: Box::new(query.into()),
            not: true,
        }
        .into()
    }
}

impl From<ExprExists> for Expr {
    fn from(value: ExprExists) -> Self {
        Expr::Exists(value)
    }
}
