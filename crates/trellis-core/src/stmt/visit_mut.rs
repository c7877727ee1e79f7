use super::*;

/// Mutable traversal over a statement tree. Mirrors [`Visit`](super::Visit).
pub trait VisitMut: Sized {
    fn visit_expr_mut(&mut self, i: &mut Expr) {
        visit_expr_mut(self, i);
    }

    fn visit_expr_and_mut(&mut self, i: &mut ExprAnd) {
        visit_expr_and_mut(self, i);
    }

    fn visit_expr_between_mut(&mut self, i: &mut ExprBetween) {
        visit_expr_between_mut(self, i);
    }

    fn visit_expr_binary_op_mut(&mut self, i: &mut ExprBinaryOp) {
        visit_expr_binary_op_mut(self, i);
    }

    fn visit_expr_case_mut(&mut self, i: &mut ExprCase) {
        visit_expr_case_mut(self, i);
    }

    fn visit_expr_column_mut(&mut self, i: &mut ExprColumn) {
        visit_expr_column_mut(self, i);
    }

    fn visit_expr_exists_mut(&mut self, i: &mut ExprExists) {
        visit_expr_exists_mut(self, i);
    }

    fn visit_expr_func_mut(&mut self, i: &mut ExprFunc) {
        visit_expr_func_mut(self, i);
    }

    fn visit_expr_in_list_mut(&mut self, i: &mut ExprInList) {
        visit_expr_in_list_mut(self, i);
    }

    fn visit_expr_in_subquery_mut(&mut self, i: &mut ExprInSubquery) {
        visit_expr_in_subquery_mut(self, i);
    }

    fn visit_expr_is_null_mut(&mut self, i: &mut ExprIsNull) {
        visit_expr_is_null_mut(self, i);
    }

    fn visit_expr_like_mut(&mut self, i: &mut ExprLike) {
        visit_expr_like_mut(self, i);
    }

    fn visit_expr_not_mut(&mut self, i: &mut ExprNot) {
        visit_expr_not_mut(self, i);
    }

    fn visit_expr_or_mut(&mut self, i: &mut ExprOr) {
        visit_expr_or_mut(self, i);
    }

    fn visit_expr_param_mut(&mut self, i: &mut ExprParam) {
        visit_expr_param_mut(self, i);
    }

    fn visit_expr_stmt_mut(&mut self, i: &mut ExprStmt) {
        visit_expr_stmt_mut(self, i);
    }

    fn visit_value_mut(&mut self, i: &mut Value) {
        visit_value_mut(self, i);
    }

    fn visit_stmt_mut(&mut self, i: &mut Statement) {
        visit_stmt_mut(self, i);
    }

    fn visit_select_mut(&mut self, i: &mut Select) {
        visit_select_mut(self, i);
    }

    fn visit_insert_mut(&mut self, i: &mut Insert) {
        visit_insert_mut(self, i);
    }

    fn visit_update_mut(&mut self, i: &mut Update) {
        visit_update_mut(self, i);
    }

    fn visit_delete_mut(&mut self, i: &mut Delete) {
        visit_delete_mut(self, i);
    }
}

pub fn visit_expr_mut<V: VisitMut>(v: &mut V, node: &mut Expr) {
    match node {
        Expr::And(e) => v.visit_expr_and_mut(e),
        Expr::Between(e) => v.visit_expr_between_mut(e),
        Expr::BinaryOp(e) => v.visit_expr_binary_op_mut(e),
        Expr::Case(e) => v.visit_expr_case_mut(e),
        Expr::Column(e) => v.visit_expr_column_mut(e),
        Expr::Exists(e) => v.visit_expr_exists_mut(e),
        Expr::Func(e) => v.visit_expr_func_mut(e),
        Expr::InList(e) => v.visit_expr_in_list_mut(e),
        Expr::InSubquery(e) => v.visit_expr_in_subquery_mut(e),
        Expr::IsNull(e) => v.visit_expr_is_null_mut(e),
        Expr::Like(e) => v.visit_expr_like_mut(e),
        Expr::Not(e) => v.visit_expr_not_mut(e),
        Expr::Or(e) => v.visit_expr_or_mut(e),
        Expr::Param(e) => v.visit_expr_param_mut(e),
        Expr::Stmt(e) => v.visit_expr_stmt_mut(e),
        Expr::Value(e) => v.visit_value_mut(e),
    }
}

pub fn visit_expr_and_mut<V: VisitMut>(v: &mut V, node: &mut ExprAnd) {
    for operand in &mut node.operands {
        v.visit_expr_mut(operand);
    }
}

pub fn visit_expr_between_mut<V: VisitMut>(v: &mut V, node: &mut ExprBetween) {
    v.visit_expr_mut(&mut node.expr);
    v.visit_expr_mut(&mut node.low);
    v.visit_expr_mut(&mut node.high);
}

pub fn visit_expr_binary_op_mut<V: VisitMut>(v: &mut V, node: &mut ExprBinaryOp) {
    v.visit_expr_mut(&mut node.lhs);
    v.visit_expr_mut(&mut node.rhs);
}

pub fn visit_expr_case_mut<V: VisitMut>(v: &mut V, node: &mut ExprCase) {
    for when in &mut node.whens {
        v.visit_expr_mut(&mut when.condition);
        v.visit_expr_mut(&mut when.result);
    }

    if let Some(otherwise) = &mut node.otherwise {
        v.visit_expr_mut(otherwise);
    }
}

pub fn visit_expr_column_mut<V: VisitMut>(_v: &mut V, _node: &mut ExprColumn) {}

pub fn visit_expr_exists_mut<V: VisitMut>(v: &mut V, node: &mut ExprExists) {
    v.visit_expr_stmt_mut(&mut node.query);
}

pub fn visit_expr_func_mut<V: VisitMut>(v: &mut V, node: &mut ExprFunc) {
    for arg in &mut node.args {
        v.visit_expr_mut(arg);
    }
}

pub fn visit_expr_in_list_mut<V: VisitMut>(v: &mut V, node: &mut ExprInList) {
    v.visit_expr_mut(&mut node.expr);

    for item in &mut node.list {
        v.visit_expr_mut(item);
    }
}

pub fn visit_expr_in_subquery_mut<V: VisitMut>(v: &mut V, node: &mut ExprInSubquery) {
    v.visit_expr_mut(&mut node.expr);
    v.visit_expr_stmt_mut(&mut node.query);
}

pub fn visit_expr_is_null_mut<V: VisitMut>(v: &mut V, node: &mut ExprIsNull) {
    v.visit_expr_mut(&mut node.expr);
}

pub fn visit_expr_like_mut<V: VisitMut>(v: &mut V, node: &mut ExprLike) {
    v.visit_expr_mut(&mut node.expr);
    v.visit_expr_mut(&mut node.pattern);
}

pub fn visit_expr_not_mut<V: VisitMut>(v: &mut V, node: &mut ExprNot) {
    v.visit_expr_mut(&mut node.operand);
}

pub fn visit_expr_or_mut<V: VisitMut>(v: &mut V, node: &mut ExprOr) {
    for operand in &mut node.operands {
        v.visit_expr_mut(operand);
    }
}

pub fn visit_expr_param_mut<V: VisitMut>(_v: &mut V, _node: &mut ExprParam) {}

pub fn visit_expr_stmt_mut<V: VisitMut>(v: &mut V, node: &mut ExprStmt) {
    v.visit_select_mut(&mut node.stmt);
}

pub fn visit_value_mut<V: VisitMut>(_v: &mut V, _node: &mut Value) {}

pub fn visit_stmt_mut<V: VisitMut>(v: &mut V, node: &mut Statement) {
    match node {
        Statement::Select(stmt) => v.visit_select_mut(stmt),
        Statement::Insert(stmt) => v.visit_insert_mut(stmt),
        Statement::Update(stmt) => v.visit_update_mut(stmt),
        Statement::Delete(stmt) => v.visit_delete_mut(stmt),
    }
}

pub fn visit_select_mut<V: VisitMut>(v: &mut V, node: &mut Select) {
    for item in &mut node.items {
        v.visit_expr_mut(&mut item.expr);
    }

    for join in &mut node.joins {
        for on in &mut join.on {
            v.visit_expr_mut(on);
        }
    }

    if let Some(filter) = &mut node.filter {
        v.visit_expr_mut(filter);
    }

    for order in &mut node.order_by {
        v.visit_expr_mut(&mut order.expr);
    }
}

pub fn visit_insert_mut<V: VisitMut>(v: &mut V, node: &mut Insert) {
    for value in &mut node.values {
        v.visit_expr_mut(value);
    }
}

pub fn visit_update_mut<V: VisitMut>(v: &mut V, node: &mut Update) {
    for assignment in &mut node.assignments {
        v.visit_expr_mut(&mut assignment.value);
    }

    if let Some(filter) = &mut node.filter {
        v.visit_expr_mut(filter);
    }
}

pub fn visit_delete_mut<V: VisitMut>(v: &mut V, node: &mut Delete) {
    if let Some(filter) = &mut node.filter {
        v.visit_expr_mut(filter);
    }
}
