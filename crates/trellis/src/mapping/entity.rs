use trellis_core::{
    schema::{AssocId, ColumnId, TableId},
    stmt::Value,
    Result,
};

use std::any::{Any, TypeId};

pub(crate) type GetFn = Box<dyn Fn(&dyn Any) -> Result<Value> + Send + Sync>;
pub(crate) type SetFn = Box<dyn Fn(&mut dyn Any, Value) -> Result<()> + Send + Sync>;
pub(crate) type ConvertFn = Box<dyn Fn(Value) -> Value + Send + Sync>;
pub(crate) type HookFn = Box<dyn Fn(&mut dyn Any) -> Result<()> + Send + Sync>;
pub(crate) type MarksFn = Box<dyn Fn(&dyn Any) -> Result<Vec<String>> + Send + Sync>;
pub(crate) type AttachFn = Box<dyn Fn(&mut dyn Any, Box<dyn Any>) -> Result<()> + Send + Sync>;
pub(crate) type NewFn = Box<dyn Fn() -> Box<dyn Any> + Send + Sync>;
pub(crate) type CloneFn = Box<dyn Fn(&dyn Any) -> Result<Box<dyn Any>> + Send + Sync>;

/// A field declaration before column resolution.
pub(crate) struct FieldDecl {
    pub(crate) alias: String,
    pub(crate) keep_zero: bool,
    pub(crate) get: GetFn,
    pub(crate) set: SetFn,
    pub(crate) to_db: Option<ConvertFn>,
    pub(crate) from_db: Option<ConvertFn>,
}

/// An association-field declaration before resolution.
pub(crate) struct AssocDecl {
    pub(crate) name: String,
    pub(crate) child: TypeId,
    pub(crate) child_name: &'static str,
    pub(crate) attach: AttachFn,
}

/// One entity mapping as declared, with type-erased accessors but unresolved
/// column and association references.
pub(crate) struct Declared {
    pub(crate) entity: TypeId,
    pub(crate) entity_name: &'static str,
    pub(crate) table: TableId,
    pub(crate) fields: Vec<FieldDecl>,
    pub(crate) assocs: Vec<AssocDecl>,
    pub(crate) hooks: Hooks,
    pub(crate) marks: Option<MarksFn>,
    pub(crate) unmark: Option<HookFn>,
    pub(crate) new_fn: NewFn,
    pub(crate) clone_fn: CloneFn,
}

/// A mapped struct field bound to a column of the entity's table.
///
/// The `key`/`version`/`mandatory` flags are copied from the registry column
/// when the mapping is resolved, so statement builders never have to look the
/// column up again.
pub(crate) struct Field {
    pub(crate) column: ColumnId,
    /// Column alias the field was registered under.
    pub(crate) alias: String,
    pub(crate) key: bool,
    pub(crate) version: bool,
    pub(crate) mandatory: bool,
    pub(crate) is_virtual: bool,
    /// Include the field in updates even when its value is unset.
    pub(crate) keep_zero: bool,
    pub(crate) get: GetFn,
    pub(crate) set: SetFn,
    pub(crate) to_db: Option<ConvertFn>,
    pub(crate) from_db: Option<ConvertFn>,
}

impl Field {
    /// Read the field from an entity, applying the outbound converter.
    pub(crate) fn read(&self, entity: &dyn Any) -> Result<Value> {
        let value = (self.get)(entity)?;
        Ok(match &self.to_db {
            Some(convert) => convert(value),
            None => value,
        })
    }

    /// Write a database value to the field, applying the inbound converter.
    pub(crate) fn write(&self, entity: &mut dyn Any, value: Value) -> Result<()> {
        let value = match &self.from_db {
            Some(convert) => convert(value),
            None => value,
        };
        (self.set)(entity, value)
    }
}

/// A mapped association field: a singular reference or a collection on the
/// entity struct, populated by the tree transformer.
pub(crate) struct AssocField {
    pub(crate) assoc: AssocId,
    pub(crate) name: String,
    /// Entity type stored on the other side.
    pub(crate) child: TypeId,
    /// Appends to the collection, or assigns the singular reference.
    pub(crate) attach: AttachFn,
}

/// Lifecycle hooks invoked at fixed points around statement execution.
#[derive(Default)]
pub(crate) struct Hooks {
    pub(crate) pre_insert: Option<HookFn>,
    pub(crate) post_insert: Option<HookFn>,
    pub(crate) pre_update: Option<HookFn>,
    pub(crate) post_update: Option<HookFn>,
    pub(crate) pre_delete: Option<HookFn>,
    pub(crate) post_delete: Option<HookFn>,
    pub(crate) post_retrieve: Option<HookFn>,
}

/// Accessor table for one entity type, resolved against the registry.
pub(crate) struct EntityMapping {
    pub(crate) entity: TypeId,
    pub(crate) entity_name: &'static str,
    pub(crate) table: TableId,
    pub(crate) fields: Vec<Field>,
    pub(crate) assocs: Vec<AssocField>,
    pub(crate) hooks: Hooks,
    /// Returns the set of changed column aliases, when the entity tracks them.
    pub(crate) marks: Option<MarksFn>,
    pub(crate) unmark: Option<HookFn>,
    pub(crate) new_fn: NewFn,
    pub(crate) clone_fn: CloneFn,
}

impl EntityMapping {
    pub(crate) fn new_entity(&self) -> Box<dyn Any> {
        (self.new_fn)()
    }

    pub(crate) fn clone_entity(&self, entity: &dyn Any) -> Result<Box<dyn Any>> {
        (self.clone_fn)(entity)
    }

    pub(crate) fn field_for(&self, column: ColumnId) -> Option<&Field> {
        self.fields.iter().find(|field| field.column == column)
    }

    pub(crate) fn key_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.key)
    }

    pub(crate) fn version_field(&self) -> Option<&Field> {
        self.fields.iter().find(|field| field.version)
    }

    pub(crate) fn assoc_field(&self, assoc: AssocId) -> Option<&AssocField> {
        self.assocs.iter().find(|field| field.assoc == assoc)
    }

    /// Changed column aliases, or `None` when the entity does not track marks.
    pub(crate) fn marks_of(&self, entity: &dyn Any) -> Result<Option<Vec<String>>> {
        match &self.marks {
            Some(marks) => Ok(Some(marks(entity)?)),
            None => Ok(None),
        }
    }

    pub(crate) fn clear_marks(&self, entity: &mut dyn Any) -> Result<()> {
        match &self.unmark {
            Some(unmark) => unmark(entity),
            None => Ok(()),
        }
    }
}
