use super::entity::{AssocField, Declared, EntityMapping, Field};

use trellis_core::{schema::Registry, Error, Result};

use std::any::TypeId;
use std::collections::HashMap;

/// The sealed set of entity mappings, resolved against a registry when the
/// database handle is built. Lookups after that point cannot fail for
/// registered types and never mutate.
pub(crate) struct Mappings {
    entries: Vec<EntityMapping>,
    by_type: HashMap<TypeId, usize>,
}

impl Mappings {
    pub(crate) fn resolve(declared: Vec<Declared>, registry: &Registry) -> Result<Mappings> {
        let known: Vec<TypeId> = declared.iter().map(|decl| decl.entity).collect();

        let mut entries = Vec::with_capacity(declared.len());
        let mut by_type = HashMap::with_capacity(declared.len());

        for decl in declared {
            if by_type.contains_key(&decl.entity) {
                return Err(Error::invalid_schema(format!(
                    "duplicate mapping for entity `{}`",
                    decl.entity_name
                )));
            }

            let table = registry.table(decl.table);

            let mut fields = Vec::with_capacity(decl.fields.len());
            for field in decl.fields {
                let column = table
                    .columns
                    .iter()
                    .find(|column| column.alias.eq_ignore_ascii_case(&field.alias))
                    .ok_or_else(|| {
                        Error::invalid_schema(format!(
                            "entity `{}` maps field `{}` but table `{}` has no column with that alias",
                            decl.entity_name, field.alias, table.name
                        ))
                    })?;

                if fields.iter().any(|f: &Field| f.column == column.id) {
                    return Err(Error::invalid_schema(format!(
                        "entity `{}` maps column `{}` twice",
                        decl.entity_name, column.name
                    )));
                }

                fields.push(Field {
                    column: column.id,
                    alias: column.alias.clone(),
                    key: column.key,
                    version: column.version,
                    mandatory: column.mandatory,
                    is_virtual: column.is_virtual(),
                    keep_zero: field.keep_zero,
                    get: field.get,
                    set: field.set,
                    to_db: field.to_db,
                    from_db: field.from_db,
                });
            }

            let mut assocs = Vec::with_capacity(decl.assocs.len());
            for assoc_decl in decl.assocs {
                let assoc_id = table.assoc_named(&assoc_decl.name).ok_or_else(|| {
                    Error::invalid_schema(format!(
                        "entity `{}` maps association `{}` but table `{}` has no such association",
                        decl.entity_name, assoc_decl.name, table.name
                    ))
                })?;

                if assocs.iter().any(|a: &AssocField| a.assoc == assoc_id) {
                    return Err(Error::invalid_schema(format!(
                        "entity `{}` maps association `{}` twice",
                        decl.entity_name, assoc_decl.name
                    )));
                }

                if !known.contains(&assoc_decl.child) {
                    return Err(Error::invalid_schema(format!(
                        "entity `{}` association `{}` targets `{}`, which has no mapping",
                        decl.entity_name, assoc_decl.name, assoc_decl.child_name
                    )));
                }

                assocs.push(AssocField {
                    assoc: assoc_id,
                    name: assoc_decl.name,
                    child: assoc_decl.child,
                    attach: assoc_decl.attach,
                });
            }

            by_type.insert(decl.entity, entries.len());
            entries.push(EntityMapping {
                entity: decl.entity,
                entity_name: decl.entity_name,
                table: decl.table,
                fields,
                assocs,
                hooks: decl.hooks,
                marks: decl.marks,
                unmark: decl.unmark,
                new_fn: decl.new_fn,
                clone_fn: decl.clone_fn,
            });
        }

        // Association targets must live on the table the association points to.
        for entry in &entries {
            for assoc_field in &entry.assocs {
                let assoc = registry.assoc(assoc_field.assoc);
                let child = &entries[by_type[&assoc_field.child]];
                if child.table != assoc.to {
                    return Err(Error::invalid_schema(format!(
                        "entity `{}` association `{}` targets `{}`, which maps a different table",
                        entry.entity_name, assoc_field.name, child.entity_name
                    )));
                }
            }
        }

        Ok(Mappings { entries, by_type })
    }

    pub(crate) fn of<T: 'static>(&self) -> Result<&EntityMapping> {
        self.by_type_id(TypeId::of::<T>()).ok_or_else(|| {
            Error::invalid_schema(format!(
                "no mapping registered for entity `{}`",
                std::any::type_name::<T>()
            ))
        })
    }

    pub(crate) fn by_type_id(&self, entity: TypeId) -> Option<&EntityMapping> {
        self.by_type.get(&entity).map(|index| &self.entries[*index])
    }
}
