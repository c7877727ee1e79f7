use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Count,
    Sum,
    Min,
    Max,
    Avg,
    Lower,
    Upper,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprFunc {
    pub func: Func,

    /// Empty means `func(*)`, which only `COUNT` supports.
    pub args: Vec<Expr>,
}

impl Expr {
    pub fn count_star() -> Expr {
        ExprFunc {
            func: Func::Count,
            args: vec![],
        }
        .into()
    }

    pub fn func<T>(func: Func, args: T) -> Expr
    where
        T: IntoIterator,
        T::Item: Into<Expr>,
    {
        ExprFunc {
            func,
            args: args.into_iter().map(Into::into).collect(),
        }
        .into()
    }

    pub fn lower(arg: impl Into<Expr>) -> Expr {
        Expr::func(Func::Lower, [arg.into()])
    }

    pub fn upper(arg: impl Into<Expr>) -> Expr {
        Expr::func(Func::Upper, [arg.into()])
    }
}

impl Func {
    pub fn name(self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Avg => "AVG",
            Self::Lower => "LOWER",
            Self::Upper => "UPPER",
        }
    }
}

impl From<ExprFunc> for Expr {
    fn from(value: ExprFunc) -> Self {
        Expr::Func(value)
    }
}
