use super::*;

/// Read-only traversal over a statement tree.
///
/// Each method defaults to the free function of the same name, which walks
/// the node's children. Implementations override the nodes they care about
/// and call the free function (or not) to control descent. Sub-statements
/// embedded via [`ExprStmt`] are descended into by default.
pub trait Visit: Sized {
    fn visit_expr(&mut self, i: &Expr) {
        visit_expr(self, i);
    }

    fn visit_expr_and(&mut self, i: &ExprAnd) {
        visit_expr_and(self, i);
    }

    fn visit_expr_between(&mut self, i: &ExprBetween) {
        visit_expr_between(self, i);
    }

    fn visit_expr_binary_op(&mut self, i: &ExprBinaryOp) {
        visit_expr_binary_op(self, i);
    }

    fn visit_expr_case(&mut self, i: &ExprCase) {
        visit_expr_case(self, i);
    }

    fn visit_expr_column(&mut self, i: &ExprColumn) {
        visit_expr_column(self, i);
    }

    fn visit_expr_exists(&mut self, i: &ExprExists) {
        visit_expr_exists(self, i);
    }

    fn visit_expr_func(&mut self, i: &ExprFunc) {
        visit_expr_func(self, i);
    }

    fn visit_expr_in_list(&mut self, i: &ExprInList) {
        visit_expr_in_list(self, i);
    }

    fn visit_expr_in_subquery(&mut self, i: &ExprInSubquery) {
        visit_expr_in_subquery(self, i);
    }

    fn visit_expr_is_null(&mut self, i: &ExprIsNull) {
        visit_expr_is_null(self, i);
    }

    fn visit_expr_like(&mut self, i: &ExprLike) {
        visit_expr_like(self, i);
    }

    fn visit_expr_not(&mut self, i: &ExprNot) {
        visit_expr_not(self, i);
    }

    fn visit_expr_or(&mut self, i: &ExprOr) {
        visit_expr_or(self, i);
    }

    fn visit_expr_param(&mut self, i: &ExprParam) {
        visit_expr_param(self, i);
    }

    fn visit_expr_stmt(&mut self, i: &ExprStmt) {
        visit_expr_stmt(self, i);
    }

    fn visit_value(&mut self, i: &Value) {
        visit_value(self, i);
    }

    fn visit_stmt(&mut self, i: &Statement) {
        visit_stmt(self, i);
    }

    fn visit_select(&mut self, i: &Select) {
        visit_select(self, i);
    }

    fn visit_insert(&mut self, i: &Insert) {
        visit_insert(self, i);
    }

    fn visit_update(&mut self, i: &Update) {
        visit_update(self, i);
    }

    fn visit_delete(&mut self, i: &Delete) {
        visit_delete(self, i);
    }
}

pub fn visit_expr<V: Visit>(v: &mut V, node: &Expr) {
    match node {
        Expr::And(e) => v.visit_expr_and(e),
        Expr::Between(e) => v.visit_expr_between(e),
        Expr::BinaryOp(e) => v.visit_expr_binary_op(e),
        Expr::Case(e) => v.visit_expr_case(e),
        Expr::Column(e) => v.visit_expr_column(e),
        Expr::Exists(e) => v.visit_expr_exists(e),
        Expr::Func(e) => v.visit_expr_func(e),
        Expr::InList(e) => v.visit_expr_in_list(e),
        Expr::InSubquery(e) => v.visit_expr_in_subquery(e),
        Expr::IsNull(e) => v.visit_expr_is_null(e),
        Expr::Like(e) => v.visit_expr_like(e),
        Expr::Not(e) => v.visit_expr_not(e),
        Expr::Or(e) => v.visit_expr_or(e),
        Expr::Param(e) => v.visit_expr_param(e),
        Expr::Stmt(e) => v.visit_expr_stmt(e),
        Expr::Value(e) => v.visit_value(e),
    }
}

pub fn visit_expr_and<V: Visit>(v: &mut V, node: &ExprAnd) {
    for operand in &node.operands {
        v.visit_expr(operand);
    }
}

pub fn visit_expr_between<V: Visit>(v: &mut V, node: &ExprBetween) {
    v.visit_expr(&node.expr);
    v.visit_expr(&node.low);
    v.visit_expr(&node.high);
}

pub fn visit_expr_binary_op<V: Visit>(v: &mut V, node: &ExprBinaryOp) {
    v.visit_expr(&node.lhs);
    v.visit_expr(&node.rhs);
}

pub fn visit_expr_case<V: Visit>(v: &mut V, node: &ExprCase) {
    for when in &node.whens {
        v.visit_expr(&when.condition);
        v.visit_expr(&when.result);
    }

    if let Some(otherwise) = &node.otherwise {
        v.visit_expr(otherwise);
    }
}

pub fn visit_expr_column<V: Visit>(_v: &mut V, _node: &ExprColumn) {}

pub fn visit_expr_exists<V: Visit>(v: &mut V, node: &ExprExists) {
    v.visit_expr_stmt(&node.query);
}

pub fn visit_expr_func<V: Visit>(v: &mut V, node: &ExprFunc) {
    for arg in &node.args {
        v.visit_expr(arg);
    }
}

pub fn visit_expr_in_list<V: Visit>(v: &mut V, node: &ExprInList) {
    v.visit_expr(&node.expr);

    for item in &node.list {
        v.visit_expr(item);
    }
}

pub fn visit_expr_in_subquery<V: Visit>(v: &mut V, node: &ExprInSubquery) {
    v.visit_expr(&node.expr);
    v.visit_expr_stmt(&node.query);
}

pub fn visit_expr_is_null<V: Visit>(v: &mut V, node: &ExprIsNull) {
    v.visit_expr(&node.expr);
}

pub fn visit_expr_like<V: Visit>(v: &mut V, node: &ExprLike) {
    v.visit_expr(&node.expr);
    v.visit_expr(&node.pattern);
}

pub fn visit_expr_not<V: Visit>(v: &mut V, node: &ExprNot) {
    v.visit_expr(&node.operand);
}

pub fn visit_expr_or<V: Visit>(v: &mut V, node: &ExprOr) {
    for operand in &node.operands {
        v.visit_expr(operand);
    }
}

pub fn visit_expr_param<V: Visit>(_v: &mut V, _node: &ExprParam) {}

pub fn visit_expr_stmt<V: Visit>(v: &mut V, node: &ExprStmt) {
    v.visit_select(&node.stmt);
}

pub fn visit_value<V: Visit>(_v: &mut V, _node: &Value) {}

pub fn visit_stmt<V: Visit>(v: &mut V, node: &Statement) {
    match node {
        Statement::Select(stmt) => v.visit_select(stmt),
        Statement::Insert(stmt) => v.visit_insert(stmt),
        Statement::Update(stmt) => v.visit_update(stmt),
        Statement::Delete(stmt) => v.visit_delete(stmt),
    }
}

pub fn visit_select<V: Visit>(v: &mut V, node: &Select) {
    for item in &node.items {
        v.visit_expr(&item.expr);
    }

    for join in &node.joins {
        for on in &join.on {
            v.visit_expr(on);
        }
    }

    if let Some(filter) = &node.filter {
        v.visit_expr(filter);
    }

    for order in &node.order_by {
        v.visit_expr(&order.expr);
    }
}

pub fn visit_insert<V: Visit>(v: &mut V, node: &Insert) {
    for value in &node.values {
        v.visit_expr(value);
    }
}

pub fn visit_update<V: Visit>(v: &mut V, node: &Update) {
    for assignment in &node.assignments {
        v.visit_expr(&assignment.value);
    }

    if let Some(filter) = &node.filter {
        v.visit_expr(filter);
    }
}

pub fn visit_delete<V: Visit>(v: &mut V, node: &Delete) {
    if let Some(filter) = &node.filter {
        v.visit_expr(filter);
    }
}
