use super::Crawler;
use crate::join::ResolvedHop;
use crate::mapping::{EntityMapping, Mappings};

use trellis_core::{driver::Rows, err, schema::AssocId, stmt::Value, Error, Result};

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

/// Transform result rows into entity trees.
///
/// Each row is walked alias by alias, guided by the crawler: the base entity
/// first, then one entity per fetch-join branch, recursively. In reuse mode
/// duplicate rows produced by outer-join fan-out collapse onto already-seen
/// entities, keyed by their key column values.
pub(crate) fn transform<T: Default + Clone + 'static>(
    mappings: &Mappings,
    base_alias: &str,
    chains: &[Vec<ResolvedHop>],
    reuse: bool,
    rows: Rows,
) -> Result<Vec<T>> {
    let mut transformer = Transformer::new(mappings, base_alias, chains, reuse, &rows.columns);

    for row in &rows.rows {
        transformer.row(row, TypeId::of::<T>())?;
    }

    let roots = transformer.finish()?;
    let mut out = Vec::with_capacity(roots.len());
    for root in roots {
        let root = root
            .downcast::<T>()
            .map_err(|_| err!("entity type mismatch: expected `{}`", std::any::type_name::<T>()))?;
        out.push(*root);
    }
    Ok(out)
}

struct Transformer<'a> {
    mappings: &'a Mappings,
    crawler: Crawler,
    reuse: bool,
    base_alias: String,
    /// Result label (`alias.columnAlias`) to row position.
    columns: HashMap<String, usize>,
    /// One resolved field layout per (alias, entity type) pair.
    map_index: HashMap<(String, TypeId), usize>,
    maps: Vec<AliasMap>,
    /// Reuse-mode entity cache.
    cache: HashMap<(String, Vec<ValueKey>), usize>,
    arena: Vec<Slot>,
    edges: Vec<Edge>,
    edge_seen: HashSet<(usize, AssocId, usize)>,
    roots: Vec<usize>,
    root_seen: HashSet<usize>,
}

struct Slot {
    value: Box<dyn Any>,
    entity: TypeId,
}

struct Edge {
    parent: usize,
    child: usize,
    assoc: AssocId,
    /// Chain depth of the child; deepest edges are attached first.
    depth: usize,
}

/// Field layout of one entity type at one alias: for every mapped field, the
/// row position its labeled column landed on, if it was selected.
struct AliasMap {
    cells: Vec<Option<usize>>,
    /// (field index, row position) for the key fields present in the selection.
    key_cells: Vec<(usize, usize)>,
}

impl<'a> Transformer<'a> {
    fn new(
        mappings: &'a Mappings,
        base_alias: &str,
        chains: &[Vec<ResolvedHop>],
        reuse: bool,
        labels: &[String],
    ) -> Transformer<'a> {
        let columns = labels
            .iter()
            .enumerate()
            .map(|(index, label)| (label.clone(), index))
            .collect();

        Transformer {
            mappings,
            crawler: Crawler::new(chains),
            reuse,
            base_alias: base_alias.to_string(),
            columns,
            map_index: HashMap::new(),
            maps: Vec::new(),
            cache: HashMap::new(),
            arena: Vec::new(),
            edges: Vec::new(),
            edge_seen: HashSet::new(),
            roots: Vec::new(),
            root_seen: HashSet::new(),
        }
    }

    fn row(&mut self, row: &[Value], root: TypeId) -> Result<()> {
        self.crawler.rewind();
        let base_alias = self.base_alias.clone();
        if let Some(index) = self.node(row, &base_alias, root, 0)? {
            if self.root_seen.insert(index) {
                self.roots.push(index);
            }
        }
        Ok(())
    }

    /// Transform the entity at `alias`, then its fetch branches. The crawler
    /// cursor moves past this node and its whole subtree, whether or not the
    /// entity materializes.
    fn node(&mut self, row: &[Value], alias: &str, entity: TypeId, depth: usize) -> Result<Option<usize>> {
        let branches = self.crawler.branches();
        self.crawler.forward();

        let Some(parent) = self.entity(row, alias, entity)? else {
            for _ in &branches {
                self.skip_node();
            }
            return Ok(None);
        };

        let mapping = self.mapping_of(entity)?;
        for branch in &branches {
            match mapping.assoc_field(branch.assoc) {
                Some(field) => {
                    let (child_type, assoc) = (field.child, field.assoc);
                    if let Some(child) = self.node(row, &branch.to_alias, child_type, depth + 1)? {
                        if self.edge_seen.insert((parent, assoc, child)) {
                            self.edges.push(Edge {
                                parent,
                                child,
                                assoc,
                                depth: depth + 1,
                            });
                        }
                    }
                }
                // Fetched but not mapped: consume the branch anyway so the
                // cursor stays aligned.
                None => self.skip_node(),
            }
        }

        Ok(Some(parent))
    }

    fn skip_node(&mut self) {
        let branches = self.crawler.branches();
        self.crawler.forward();
        for _ in &branches {
            self.skip_node();
        }
    }

    /// Materialize (or look up) the entity for `alias` out of one row.
    ///
    /// Returns `None` for an invalid occurrence: a key column selected for
    /// the alias came back unset, or every selected cell is NULL. Outer joins
    /// that matched nothing produce exactly these rows.
    fn entity(&mut self, row: &[Value], alias: &str, entity: TypeId) -> Result<Option<usize>> {
        let map_index = self.alias_map(alias, entity)?;

        let (invalid, key) = {
            let map = &self.maps[map_index];

            let unset_key = map
                .key_cells
                .iter()
                .any(|(_, position)| row[*position].is_unset());
            let all_null = map.key_cells.is_empty()
                && map
                    .cells
                    .iter()
                    .flatten()
                    .all(|position| matches!(row[*position], Value::Null));

            let key: Vec<ValueKey> = map
                .key_cells
                .iter()
                .map(|(_, position)| ValueKey::from(&row[*position]))
                .collect();

            (unset_key || all_null, key)
        };

        if invalid {
            return Ok(None);
        }

        if self.reuse {
            let cache_key = (alias.to_string(), key);
            if let Some(&index) = self.cache.get(&cache_key) {
                return Ok(Some(index));
            }
            let index = self.materialize(row, map_index, entity)?;
            self.cache.insert(cache_key, index);
            return Ok(Some(index));
        }

        Ok(Some(self.materialize(row, map_index, entity)?))
    }

    fn materialize(&mut self, row: &[Value], map_index: usize, entity: TypeId) -> Result<usize> {
        let mapping = self.mapping_of(entity)?;
        let mut value = mapping.new_entity();

        let map = &self.maps[map_index];
        for (field, cell) in mapping.fields.iter().zip(&map.cells) {
            if let Some(position) = cell {
                field.write(value.as_mut(), row[*position].clone())?;
            }
        }

        let index = self.arena.len();
        self.arena.push(Slot { value, entity });
        Ok(index)
    }

    /// Resolve and cache the field layout for one (alias, entity) pair.
    ///
    /// In reuse mode an entity type with key fields must have at least one of
    /// them selected, otherwise rows cannot be collapsed and the statement is
    /// misconfigured.
    fn alias_map(&mut self, alias: &str, entity: TypeId) -> Result<usize> {
        let lookup = (alias.to_string(), entity);
        if let Some(&index) = self.map_index.get(&lookup) {
            return Ok(index);
        }

        let mapping = self.mapping_of(entity)?;
        let mut cells = Vec::with_capacity(mapping.fields.len());
        let mut key_cells = Vec::new();

        for (index, field) in mapping.fields.iter().enumerate() {
            let label = format!("{}.{}", alias, field.alias);
            let position = self.columns.get(&label).copied();
            if let (true, Some(position)) = (field.key, position) {
                key_cells.push((index, position));
            }
            cells.push(position);
        }

        if self.reuse && key_cells.is_empty() && mapping.key_fields().next().is_some() {
            return Err(Error::missing_key(format!(
                "no key column of `{}` is selected under alias `{}`",
                mapping.entity_name, alias
            )));
        }

        let index = self.maps.len();
        self.maps.push(AliasMap { cells, key_cells });
        self.map_index.insert(lookup, index);
        Ok(index)
    }

    fn mapping_of(&self, entity: TypeId) -> Result<&'a EntityMapping> {
        self.mappings
            .by_type_id(entity)
            .ok_or_else(|| Error::invalid_schema("entity type has no mapping"))
    }

    /// Run retrieve hooks, then assemble the object graph bottom-up and hand
    /// the roots out.
    fn finish(mut self) -> Result<Vec<Box<dyn Any>>> {
        let mappings = self.mappings;

        for slot in &mut self.arena {
            let mapping = mappings
                .by_type_id(slot.entity)
                .ok_or_else(|| Error::invalid_schema("entity type has no mapping"))?;
            if let Some(hook) = &mapping.hooks.post_retrieve {
                hook(slot.value.as_mut())?;
            }
        }

        // Deepest edges first: a child must own its own children before it
        // is cloned into a parent. The sort is stable, so siblings keep row
        // encounter order.
        self.edges.sort_by(|a, b| b.depth.cmp(&a.depth));

        let edges = std::mem::take(&mut self.edges);
        for edge in &edges {
            let child = &self.arena[edge.child];
            let child_mapping = self.mapping_of(child.entity)?;
            let clone = child_mapping.clone_entity(child.value.as_ref())?;

            let parent_entity = self.arena[edge.parent].entity;
            let parent_mapping = self.mapping_of(parent_entity)?;
            let attach = parent_mapping
                .assoc_field(edge.assoc)
                .ok_or_else(|| Error::invalid_schema("association is not mapped"))?;

            (attach.attach)(self.arena[edge.parent].value.as_mut(), clone)?;
        }

        let mut roots = Vec::with_capacity(self.roots.len());
        for &index in &self.roots {
            let slot = &self.arena[index];
            let mapping = self.mapping_of(slot.entity)?;
            roots.push(mapping.clone_entity(slot.value.as_ref())?);
        }
        Ok(roots)
    }
}

/// Hashable form of a key value, used to collapse duplicate rows.
#[derive(Clone, PartialEq, Eq, Hash)]
enum ValueKey {
    Bool(bool),
    I64(i64),
    /// Bit pattern; keys are compared for identity, not numeric equality.
    F64(u64),
    Str(String),
    Bytes(Vec<u8>),
    Null,
}

impl From<&Value> for ValueKey {
    fn from(value: &Value) -> ValueKey {
        match value {
            Value::Bool(value) => ValueKey::Bool(*value),
            Value::I64(value) => ValueKey::I64(*value),
            Value::F64(value) => ValueKey::F64(value.to_bits()),
            Value::String(value) => ValueKey::Str(value.clone()),
            Value::Bytes(value) => ValueKey::Bytes(value.clone()),
            Value::Null => ValueKey::Null,
        }
    }
}
