use trellis_core::schema::{AssocId, ColumnId};
use trellis_core::stmt::Expr;

/// One requested hop of a join chain, named by association identity.
#[derive(Clone)]
pub struct JoinStep {
    pub assoc: AssocId,
    /// INNER when set; LEFT OUTER otherwise.
    pub inner: bool,
    /// Extra predicate merged into the hop's ON clause, bound to the
    /// destination alias.
    pub filter: Option<Expr>,
    /// Extra destination columns to project.
    pub columns: Vec<ColumnId>,
    /// Caller-preferred destination alias.
    pub alias: Option<String>,
}

impl JoinStep {
    pub fn new(assoc: AssocId) -> JoinStep {
        JoinStep {
            assoc,
            inner: false,
            filter: None,
            columns: Vec::new(),
            alias: None,
        }
    }
}

/// A hop after alias resolution.
///
/// Many-to-many hops stay logical here: the two physical joins land in the
/// resolver's emitted hop list, while the resolved path keeps the composed
/// association together with the junction alias it walked through.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedHop {
    pub assoc: AssocId,
    pub inner: bool,
    pub from_alias: String,
    pub to_alias: String,
    pub junction_alias: Option<String>,
}
