use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprOr {
    pub operands: Vec<Expr>,
}

impl Expr {
    pub fn or<T>(operands: T) -> Expr
    where
        T: IntoIterator,
        T::Item: Into<Expr>,
    {
        let mut flat = vec![];

        for operand in operands {
            match operand.into() {
                Expr::Or(or) => flat.extend(or.operands),
                expr => flat.push(expr),
            }
        }

        match flat.len() {
            0 => Expr::Value(Value::Bool(false)),
            1 => flat.into_iter().next().unwrap(),
            _ => ExprOr { operands: flat }.into(),
        }
    }
}

impl From<ExprOr> for Expr {
    fn from(value: ExprOr) -> Self {
        Expr::Or(value)
    }
}
