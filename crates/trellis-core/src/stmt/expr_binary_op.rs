use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinaryOp {
    pub lhs: Box<Expr>,
    pub op: BinaryOp,
    pub rhs: Box<Expr>,
}

impl Expr {
    pub fn binary_op(lhs: impl Into<Expr>, op: BinaryOp, rhs: impl Into<Expr>) -> Expr {
        ExprBinaryOp {
            lhs: Box::new(lhs.into()),
            op,
            rhs: Box::new(rhs.into()),
        }
        .into()
    }

    pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    pub fn ne(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Ne, rhs)
    }

    pub fn gt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Gt, rhs)
    }

    pub fn ge(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Ge, rhs)
    }

    pub fn lt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Lt, rhs)
    }

    pub fn le(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Le, rhs)
    }

    pub fn add(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Add, rhs)
    }

    pub fn sub(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Sub, rhs)
    }

    pub fn mul(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Mul, rhs)
    }

    pub fn div(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Div, rhs)
    }
}

impl From<ExprBinaryOp> for Expr {
    fn from(value: ExprBinaryOp) -> Self {
        Expr::BinaryOp(value)
    }
}
