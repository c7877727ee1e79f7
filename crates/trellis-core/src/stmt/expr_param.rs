use super::*;

/// A named parameter placeholder.
///
/// Parameters are rendered as driver placeholders and their bound values
/// travel alongside the statement; the name never reaches the database.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprParam {
    pub name: String,
}

impl Expr {
    pub fn param(name: impl Into<String>) -> Expr {
        ExprParam { name: name.into() }.into()
    }
}

impl From<ExprParam> for Expr {
    fn from(value: ExprParam) -> Self {
        Expr::Param(value)
    }
}
