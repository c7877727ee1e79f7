use super::*;

/// A sub-statement embedded in an expression position.
///
/// The sub-statement carries its own bound parameters. Embedding freezes
/// them: builders flatten these bindings into the outer statement when the
/// enclosing expression is attached, renaming on collision.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub stmt: Box<Select>,
    pub params: Params,
}

impl Expr {
    pub fn stmt(select: impl Into<ExprStmt>) -> Expr {
        select.into().into()
    }
}

impl ExprStmt {
    pub fn new(stmt: Select) -> ExprStmt {
        ExprStmt {
            stmt: Box::new(stmt),
            params: Params::default(),
        }
    }

    pub fn with_params(stmt: Select, params: Params) -> ExprStmt {
        ExprStmt {
            stmt: Box::new(stmt),
            params,
        }
    }
}

impl From<Select> for ExprStmt {
    fn from(value: Select) -> Self {
        ExprStmt::new(value)
    }
}

impl From<ExprStmt> for Expr {
    fn from(value: ExprStmt) -> Self {
        Expr::Stmt(value)
    }
}

impl From<Select> for Expr {
    fn from(value: Select) -> Self {
        Expr::Stmt(value.into())
    }
}
