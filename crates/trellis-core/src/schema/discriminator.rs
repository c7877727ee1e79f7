use super::ColumnId;
use crate::stmt::Value;

/// A static (column, value) predicate.
///
/// Discriminators attached to a table or association are AND-ed into every
/// statement touching that table or edge. They are not optional: soft-delete
/// flags and shared-table sub-typing rely on them firing unconditionally.
#[derive(Debug, Clone, PartialEq)]
pub struct Discriminator {
    pub column: ColumnId,
    pub value: Value,
}

impl Discriminator {
    pub fn new(column: ColumnId, value: impl Into<Value>) -> Discriminator {
        Discriminator {
            column,
            value: value.into(),
        }
    }
}
