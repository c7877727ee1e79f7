mod delete;
pub use delete::Delete;

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_between;
pub use expr_between::ExprBetween;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_case;
pub use expr_case::{CaseWhen, ExprCase};

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_exists;
pub use expr_exists::ExprExists;

mod expr_func;
pub use expr_func::{ExprFunc, Func};

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_in_subquery;
pub use expr_in_subquery::ExprInSubquery;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_like;
pub use expr_like::ExprLike;

mod expr_not;
pub use expr_not::ExprNot;

mod expr_or;
pub use expr_or::ExprOr;

mod expr_param;
pub use expr_param::ExprParam;

mod expr_stmt;
pub use expr_stmt::ExprStmt;

mod insert;
pub use insert::Insert;

mod join;
pub use join::JoinHop;

mod op_binary;
pub use op_binary::BinaryOp;

mod order_by;
pub use order_by::OrderByExpr;

mod params;
pub use params::Params;

mod projection;
pub use projection::SelectItem;

mod select;
pub use select::Select;

mod statement;
pub use statement::{Statement, StmtKind};

mod update;
pub use update::{Assignment, Update};

mod value;
pub use value::Value;

pub mod visit;
pub use visit::Visit;

pub mod visit_mut;
pub use visit_mut::VisitMut;

use crate::schema::{AssocId, ColumnId, TableId};

use std::fmt;
