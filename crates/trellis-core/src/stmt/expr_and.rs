use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprAnd {
    pub operands: Vec<Expr>,
}

impl Expr {
    pub fn and<T>(operands: T) -> Expr
    where
        T: IntoIterator,
        T::Item: Into<Expr>,
    {
        let mut flat = vec![];

        for operand in operands {
            // Nested ANDs collapse into a single level.
            match operand.into() {
                Expr::And(and) => flat.extend(and.operands),
                expr => flat.push(expr),
            }
        }

        match flat.len() {
            0 => Expr::Value(Value::Bool(true)),
            1 => flat.into_iter().next().unwrap(),
            _ => ExprAnd { operands: flat }.into(),
        }
    }

    /// AND `operand` onto this expression in place.
    pub fn push_and(&mut self, operand: impl Into<Expr>) {
        let lhs = std::mem::take(self);
        *self = Expr::and([lhs, operand.into()]);
    }
}

impl From<ExprAnd> for Expr {
    fn from(value: ExprAnd) -> Self {
        Expr::And(value)
    }
}
