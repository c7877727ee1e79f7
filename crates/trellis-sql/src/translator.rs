use trellis_core::schema::{Column, Table};
use trellis_core::stmt::{BinaryOp, Func, Select, StmtKind};
use trellis_core::Result;

/// How a dialect produces values for auto-generated key columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoKeyStrategy {
    /// Keys are always supplied by the caller.
    None,

    /// Fetch the next key value with [`Translator::auto_number_query`]
    /// before the insert and include it in the column list.
    BeforeInsert,

    /// Append a RETURNING clause to the insert and read the key from it.
    Returning,

    /// Insert without the key, then fetch the generated value with
    /// [`Translator::auto_number_query`].
    AfterInsert,
}

/// Dialect seam for SQL rendering.
///
/// Every method has an ANSI-flavored default; a dialect overrides only what
/// it disagrees with. The renderer consults this trait for names, operators,
/// placeholders, and pagination, and never interprets the returned strings.
pub trait Translator {
    fn table_name(&self, table: &Table) -> String {
        self.ident(&table.name)
    }

    fn column_name(&self, column: &Column) -> String {
        self.ident(&column.name)
    }

    /// Result-set label for a column, unqualified.
    fn column_alias(&self, column: &Column) -> String {
        column.alias.clone()
    }

    /// Quote an identifier. The default doubles embedded quotes, per ANSI.
    fn ident(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        out.push('"');
        for ch in name.chars() {
            if ch == '"' {
                out.push('"');
            }
            out.push(ch);
        }
        out.push('"');
        out
    }

    /// Placeholder for the `index`-th positional argument (1-based). `name`
    /// is the bound parameter's name, for dialects with named placeholders;
    /// it is empty for inlined literal values.
    fn placeholder(&self, index: usize, name: &str) -> String {
        let _ = (index, name);
        "?".to_string()
    }

    /// Render one binary operator. `kind` is the statement being rendered,
    /// for dialects whose operator spelling depends on it.
    fn binary_operator(&self, kind: StmtKind, op: BinaryOp) -> Result<String> {
        let _ = kind;
        Ok(op.to_string())
    }

    fn function(&self, func: Func) -> Result<String> {
        Ok(func.name().to_string())
    }

    /// Wrap an already-rendered SELECT with the dialect's pagination clause.
    fn paginate(&self, select: &Select, sql: String) -> String {
        let mut sql = sql;

        if let Some(limit) = select.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        if let Some(offset) = select.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        sql
    }

    fn auto_key_strategy(&self) -> AutoKeyStrategy {
        AutoKeyStrategy::None
    }

    /// Statement that produces the next (or last) auto-generated value for
    /// `column`, for the before-insert and after-insert strategies.
    fn auto_number_query(&self, table: &Table, column: &Column) -> Option<String> {
        let _ = (table, column);
        None
    }
}

/// Plain ANSI SQL: every [`Translator`] default, no overrides.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ansi;

impl Translator for Ansi {}
