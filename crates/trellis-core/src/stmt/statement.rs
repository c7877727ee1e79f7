use super::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

/// Statement kind, handed to translators so operator rendering can vary by
/// statement when a dialect needs it to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl Statement {
    pub fn kind(&self) -> StmtKind {
        match self {
            Self::Select(_) => StmtKind::Select,
            Self::Insert(_) => StmtKind::Insert,
            Self::Update(_) => StmtKind::Update,
            Self::Delete(_) => StmtKind::Delete,
        }
    }

    pub fn table(&self) -> TableId {
        match self {
            Self::Select(stmt) => stmt.table,
            Self::Insert(stmt) => stmt.table,
            Self::Update(stmt) => stmt.table,
            Self::Delete(stmt) => stmt.table,
        }
    }

    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Self::Select(stmt) => Some(stmt),
            _ => None,
        }
    }
}

impl fmt::Display for StmtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        })
    }
}
