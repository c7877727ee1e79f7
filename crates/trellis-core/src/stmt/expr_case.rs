use super::*;

/// One `WHEN condition THEN result` arm of a searched CASE.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseWhen {
    pub condition: Expr,
    pub result: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprCase {
    pub whens: Vec<CaseWhen>,
    pub otherwise: Option<Box<Expr>>,
}

impl Expr {
    pub fn case(whens: Vec<CaseWhen>, otherwise: Option<Expr>) -> Expr {
        ExprCase {
            whens,
            otherwise: otherwise.map(Box::new),
        }
        .into()
    }
}

impl CaseWhen {
    pub fn new(condition: impl Into<Expr>, result: impl Into<Expr>) -> CaseWhen {
        CaseWhen {
            condition: condition.into(),
            result: result.into(),
        }
    }
}

impl From<ExprCase> for Expr {
    fn from(value: ExprCase) -> Self {
        Expr::Case(value)
    }
}
