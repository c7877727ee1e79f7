use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprNot {
    pub operand: Box<Expr>,
}

impl Expr {
    pub fn not(operand: impl Into<Expr>) -> Expr {
        match operand.into() {
            // Double negation cancels.
            Expr::Not(not) => *not.operand,
            expr => ExprNot {
                operand: Box::new(expr),
            }
            .into(),
        }
    }
}

impl From<ExprNot> for Expr {
    fn from(value: ExprNot) -> Self {
        Expr::Not(value)
    }
}
