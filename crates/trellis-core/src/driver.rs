use crate::{stmt::Value, Result};

/// Executes finalized SQL against a database.
///
/// Implementations wrap whatever handle the application scopes to the current
/// unit of work (a raw connection, a pooled one, an open transaction). Trellis
/// never opens or closes connections itself; it hands over a rendered SQL
/// string plus positional parameters and consumes the already-scanned result.
pub trait Connection {
    /// Execute a statement, returning the number of affected rows.
    fn exec(&mut self, sql: &str, params: &[Value]) -> Result<u64>;

    /// Execute a query, returning all scanned rows.
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Rows>;
}

/// Rows produced by [`Connection::query`], scanned into [`Value`]s.
#[derive(Debug, Default, Clone)]
pub struct Rows {
    /// Result column labels, in selection order.
    pub columns: Vec<String>,

    /// Row buffers; every row has one value per result column.
    pub rows: Vec<Vec<Value>>,
}

impl Rows {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first row, if any. Used by single-value lookups such as generated
    /// key retrieval.
    pub fn first(&self) -> Option<&[Value]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// The first value of the first row, if any.
    pub fn scalar(&self) -> Option<&Value> {
        self.first().and_then(<[Value]>::first)
    }
}

impl IntoIterator for Rows {
    type Item = Vec<Value>;
    type IntoIter = std::vec::IntoIter<Vec<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
