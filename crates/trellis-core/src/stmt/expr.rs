use super::*;

/// A node in a statement's expression tree.
///
/// Expressions are built programmatically (never parsed) and stay passive:
/// constructing one performs no I/O and no rendering. Variants carry their
/// payload in a dedicated struct so each shape can grow helpers of its own.
#[derive(Clone, PartialEq)]
pub enum Expr {
    /// AND a set of boolean expressions
    And(ExprAnd),

    /// Test if an expression falls within a range
    Between(ExprBetween),

    /// Binary expression (comparison or arithmetic)
    BinaryOp(ExprBinaryOp),

    /// Searched CASE expression
    Case(ExprCase),

    /// Reference a column, optionally qualified by a table alias
    Column(ExprColumn),

    /// Test whether a subquery returns any rows
    Exists(ExprExists),

    /// Function application
    Func(ExprFunc),

    /// Test if an expression is a member of a list of values
    InList(ExprInList),

    /// Test if an expression is a member of a subquery result
    InSubquery(ExprInSubquery),

    /// Test an expression for NULL
    IsNull(ExprIsNull),

    /// Pattern match
    Like(ExprLike),

    /// Logical negation
    Not(ExprNot),

    /// OR a set of boolean expressions
    Or(ExprOr),

    /// Named parameter placeholder
    Param(ExprParam),

    /// A sub-statement embedded as an expression
    Stmt(ExprStmt),

    /// A literal value
    Value(Value),
}

impl Expr {
    pub const fn null() -> Self {
        Self::Value(Value::Null)
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }

    pub fn is_param(&self) -> bool {
        matches!(self, Self::Param(_))
    }

    /// Returns the expression's left-hand operand, if its shape has one.
    ///
    /// An operand slot holding `Expr::null()` counts as vacant so callers can
    /// build `expr OP <later>` incrementally.
    pub fn left(&self) -> Option<&Expr> {
        match self {
            Self::BinaryOp(e) => Some(&e.lhs),
            Self::Between(e) => Some(&e.expr),
            Self::InList(e) => Some(&e.expr),
            Self::InSubquery(e) => Some(&e.expr),
            Self::IsNull(e) => Some(&e.expr),
            Self::Like(e) => Some(&e.expr),
            _ => None,
        }
    }

    pub fn right(&self) -> Option<&Expr> {
        match self {
            Self::BinaryOp(e) => Some(&e.rhs),
            Self::Like(e) => Some(&e.pattern),
            _ => None,
        }
    }

    /// Replace every unqualified column reference in this expression tree
    /// with one qualified by `alias`. References that already carry an alias
    /// are left untouched.
    pub fn set_table_alias(&mut self, alias: &str) {
        struct SetTableAlias<'a> {
            alias: &'a str,
        }

        impl VisitMut for SetTableAlias<'_> {
            fn visit_expr_column_mut(&mut self, i: &mut ExprColumn) {
                if i.table_alias.is_none() {
                    i.table_alias = Some(self.alias.to_string());
                }
            }

            // Sub-statements own their alias space.
            fn visit_expr_stmt_mut(&mut self, _i: &mut ExprStmt) {}
        }

        SetTableAlias { alias }.visit_expr_mut(self);
    }

    /// Collect the named parameters referenced anywhere in this expression,
    /// in first-appearance order. Sub-statements are included.
    pub fn param_names(&self) -> Vec<String> {
        struct CollectParams {
            names: Vec<String>,
        }

        impl Visit for CollectParams {
            fn visit_expr_param(&mut self, i: &ExprParam) {
                if !self.names.iter().any(|n| n == &i.name) {
                    self.names.push(i.name.clone());
                }
            }
        }

        let mut collect = CollectParams { names: vec![] };
        collect.visit_expr(self);
        collect.names
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(e) => e.fmt(f),
            Self::Between(e) => e.fmt(f),
            Self::BinaryOp(e) => e.fmt(f),
            Self::Case(e) => e.fmt(f),
            Self::Column(e) => e.fmt(f),
            Self::Exists(e) => e.fmt(f),
            Self::Func(e) => e.fmt(f),
            Self::InList(e) => e.fmt(f),
            Self::InSubquery(e) => e.fmt(f),
            Self::IsNull(e) => e.fmt(f),
            Self::Like(e) => e.fmt(f),
            Self::Not(e) => e.fmt(f),
            Self::Or(e) => e.fmt(f),
            Self::Param(e) => e.fmt(f),
            Self::Stmt(e) => e.fmt(f),
            Self::Value(e) => e.fmt(f),
        }
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(value.into())
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Self::Value(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Value(value.into())
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self::Value(value.into())
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}
