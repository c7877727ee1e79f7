use super::{AliasBag, JoinStep, ResolvedHop};

use trellis_core::schema::{Assoc, AssocId, ColumnId, Many2Many, Registry, TableId};
use trellis_core::stmt::{Expr, JoinHop};
use trellis_core::Result;

/// Resolves requested join chains into table aliases and physical joins.
///
/// Chains already resolved by this resolver are remembered; a later request
/// reuses the deepest cached chain sharing a prefix with it (same association
/// and inner flag, position by position) and only the remaining suffix mints
/// aliases and emits joins. Two matching cached chains of equal depth resolve
/// to the first one recorded.
pub struct Resolver<'a> {
    registry: &'a Registry,
    bag: AliasBag,
    base_alias: String,
    cached: Vec<Vec<ResolvedHop>>,
    hops: Vec<JoinHop>,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a Registry, base_alias: &str) -> Resolver<'a> {
        Resolver {
            registry,
            bag: AliasBag::new(base_alias),
            base_alias: base_alias.to_string(),
            cached: Vec::new(),
            hops: Vec::new(),
        }
    }

    pub fn bag_mut(&mut self) -> &mut AliasBag {
        &mut self.bag
    }

    /// Physical joins emitted so far, in emission order.
    pub fn hops(&self) -> &[JoinHop] {
        &self.hops
    }

    pub fn into_hops(self) -> Vec<JoinHop> {
        self.hops
    }

    /// Resolve one requested chain. Returns the full resolved path from the
    /// base table, prefix included.
    pub fn resolve(&mut self, chain: &[JoinStep]) -> Result<Vec<ResolvedHop>> {
        let mut resolved = self.common_prefix(chain);
        let skip = resolved.len();

        let mut current = match resolved.last() {
            Some(hop) => hop.to_alias.clone(),
            None => self.base_alias.clone(),
        };

        for step in &chain[skip..] {
            let hop = self.resolve_step(step, &current)?;
            current = hop.to_alias.clone();
            resolved.push(hop);
        }

        self.cached.push(resolved.clone());
        Ok(resolved)
    }

    fn common_prefix(&self, chain: &[JoinStep]) -> Vec<ResolvedHop> {
        let mut best: &[ResolvedHop] = &[];
        for cached in &self.cached {
            let mut len = 0;
            for (hop, step) in cached.iter().zip(chain) {
                if hop.assoc == step.assoc && hop.inner == step.inner {
                    len += 1;
                } else {
                    break;
                }
            }
            if len > best.len() {
                best = &cached[..len];
            }
        }
        best.to_vec()
    }

    fn resolve_step(&mut self, step: &JoinStep, from: &str) -> Result<ResolvedHop> {
        let registry = self.registry;
        let assoc = registry.assoc(step.assoc);

        if let Some(m2m) = &assoc.many2many {
            return self.resolve_m2m(step, assoc, m2m, from);
        }

        let to_alias = self.destination_alias(step);

        let mut on = Vec::new();
        for relation in &assoc.relations {
            on.push(Expr::eq(
                col(relation.from, from),
                col(relation.to, &to_alias),
            ));
        }
        self.table_criteria(&mut on, assoc.to, &to_alias);
        self.assoc_criterion(&mut on, assoc, from, &to_alias);
        if let Some(filter) = &step.filter {
            push_unique(&mut on, bound(filter, &to_alias));
        }

        self.hops.push(JoinHop {
            assoc: assoc.id,
            inner: step.inner,
            from_alias: from.to_string(),
            to_alias: to_alias.clone(),
            on,
        });

        Ok(ResolvedHop {
            assoc: assoc.id,
            inner: step.inner,
            from_alias: from.to_string(),
            to_alias,
            junction_alias: None,
        })
    }

    /// A many-to-many hop expands into two physical joins: origin to
    /// junction, junction to target. The junction alias is always freshly
    /// minted; a caller-preferred alias applies to the target side only.
    fn resolve_m2m(
        &mut self,
        step: &JoinStep,
        assoc: &Assoc,
        m2m: &Many2Many,
        from: &str,
    ) -> Result<ResolvedHop> {
        let registry = self.registry;
        let to_junction = registry.assoc(m2m.to_junction);
        let from_junction = registry.assoc(m2m.from_junction);

        let junction = self.bag.mint();
        let mut on = Vec::new();
        for relation in &to_junction.relations {
            on.push(Expr::eq(
                col(relation.from, from),
                col(relation.to, &junction),
            ));
        }
        self.table_criteria(&mut on, to_junction.to, &junction);
        self.assoc_criterion(&mut on, to_junction, from, &junction);
        self.hops.push(JoinHop {
            assoc: to_junction.id,
            inner: step.inner,
            from_alias: from.to_string(),
            to_alias: junction.clone(),
            on,
        });

        let to_alias = self.destination_alias(step);
        let mut on = Vec::new();
        for relation in &from_junction.relations {
            on.push(Expr::eq(
                col(relation.from, &junction),
                col(relation.to, &to_alias),
            ));
        }
        self.table_criteria(&mut on, from_junction.to, &to_alias);
        self.assoc_criterion(&mut on, from_junction, &junction, &to_alias);
        self.assoc_criterion(&mut on, assoc, from, &to_alias);
        if let Some(filter) = &step.filter {
            push_unique(&mut on, bound(filter, &to_alias));
        }
        self.hops.push(JoinHop {
            assoc: from_junction.id,
            inner: step.inner,
            from_alias: junction.clone(),
            to_alias: to_alias.clone(),
            on,
        });

        Ok(ResolvedHop {
            assoc: assoc.id,
            inner: step.inner,
            from_alias: from.to_string(),
            to_alias,
            junction_alias: Some(junction),
        })
    }

    fn destination_alias(&mut self, step: &JoinStep) -> String {
        match &step.alias {
            Some(alias) => {
                self.bag.put(step.assoc, step.inner, alias.clone());
                alias.clone()
            }
            None => self.bag.alias_of(step.assoc, step.inner),
        }
    }

    /// Destination-table discriminators, qualified with the destination alias.
    fn table_criteria(&self, on: &mut Vec<Expr>, table: TableId, alias: &str) {
        for disc in &self.registry.table(table).discriminators {
            push_unique(
                on,
                Expr::eq(col(disc.column, alias), disc.value.clone()),
            );
        }
    }

    /// The association's own discriminator. A discriminator column on the
    /// source side is qualified with the previous hop's alias.
    fn assoc_criterion(&self, on: &mut Vec<Expr>, assoc: &Assoc, from: &str, to: &str) {
        if let Some(disc) = &assoc.discriminator {
            let alias = if disc.column.table == assoc.to { to } else { from };
            push_unique(on, Expr::eq(col(disc.column, alias), disc.value.clone()));
        }
    }
}

fn col(column: ColumnId, alias: &str) -> Expr {
    Expr::column_with_alias(column, alias)
}

fn bound(filter: &Expr, alias: &str) -> Expr {
    let mut filter = filter.clone();
    filter.set_table_alias(alias);
    filter
}

fn push_unique(on: &mut Vec<Expr>, expr: Expr) {
    if !on.contains(&expr) {
        on.push(expr);
    }
}
