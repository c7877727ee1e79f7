use super::*;

use std::fmt;

/// Uniquely identifies an association within a registry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssocId(pub usize);

/// A directed edge from one table to another.
///
/// Associations are shared, immutable metadata: per-statement state (the
/// aliases each end is bound to) lives in the statement, never here.
#[derive(Debug, Clone)]
pub struct Assoc {
    pub id: AssocId,

    /// Name the association is registered under on its origin table.
    /// Synthesized associations (junction hops) carry a generated name.
    pub name: String,

    pub from: TableId,
    pub to: TableId,

    /// Column pairings joining the two tables; all `from` columns live in
    /// `self.from`, all `to` columns in `self.to`. Empty only for composed
    /// many-to-many edges, whose pairings live on the two junction hops.
    pub relations: Vec<Relation>,

    /// Extra predicate restricting the edge. The column may live on either
    /// side; resolution aliases it to whichever hop end owns it.
    pub discriminator: Option<Discriminator>,

    /// Present when this is a composed many-to-many edge. Traversal then
    /// goes through `many2many`'s two hops instead of `relations`.
    pub many2many: Option<Many2Many>,
}

/// One (from column, to column) pairing of an association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub from: ColumnId,
    pub to: ColumnId,
}

/// The two physical hops a many-to-many edge expands into: origin to
/// junction, then junction to destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Many2Many {
    pub to_junction: AssocId,
    pub from_junction: AssocId,
}

impl Assoc {
    pub fn is_many2many(&self) -> bool {
        self.many2many.is_some()
    }

    /// Human-readable identity of the edge, used when reporting resolution
    /// errors and when comparing crawler branches structurally.
    pub fn path(&self) -> String {
        let mut out = String::new();

        for (i, relation) in self.relations.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&format!(
                "{}/{}>{}/{}",
                relation.from.table.0, relation.from.index, relation.to.table.0, relation.to.index
            ));
        }

        out
    }
}

impl fmt::Debug for AssocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssocId({})", self.0)
    }
}

impl From<&Assoc> for AssocId {
    fn from(value: &Assoc) -> Self {
        value.id
    }
}
