use super::*;

/// One physical join emitted by path resolution.
///
/// A hop joins `from_alias` to `to_alias` across a single registered
/// association. Logical many-to-many hops arrive here already expanded into
/// two physical hops through the junction table.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinHop {
    /// The association this hop traverses.
    pub assoc: AssocId,

    /// Inner join when true, left outer otherwise.
    pub inner: bool,

    /// Alias of the side already in the statement.
    pub from_alias: String,

    /// Alias minted (or reused) for the joined table.
    pub to_alias: String,

    /// ON-clause predicates: the relation column equalities plus any
    /// discriminator or per-hop filter criteria.
    pub on: Vec<Expr>,
}

impl JoinHop {
    pub fn on_expr(&self) -> Expr {
        Expr::and(self.on.iter().cloned())
    }
}
