use super::entity::{
    AssocDecl, AttachFn, Declared, FieldDecl, GetFn, HookFn, Hooks, MarksFn, SetFn,
};

use trellis_core::{err, schema::TableId, stmt::Value, Error, Result};

use std::any::{Any, TypeId};
use std::marker::PhantomData;

/// Declares how an entity struct maps onto a registered table: one accessor
/// pair per column-backed field, one attach function per association field,
/// plus optional converters, change tracking, and lifecycle hooks.
///
/// Fields are identified by **column alias**, the same name the tree
/// transformer reads from result labels.
///
/// ```ignore
/// let mut books = Mapping::<Book>::new(book);
/// books.field("ID", |b| b.id.into(), |b, v| Ok(b.id = v.to_i64()?));
/// books.field("TITLE", |b| b.title.clone().into(), |b, v| Ok(b.title = v.to_string_value()?));
/// books.many("authors", |b: &mut Book, a: Author| b.authors.push(a));
/// ```
pub struct Mapping<T> {
    pub(crate) table: TableId,
    pub(crate) fields: Vec<FieldDecl>,
    pub(crate) assocs: Vec<AssocDecl>,
    pub(crate) hooks: Hooks,
    pub(crate) marks: Option<MarksFn>,
    pub(crate) unmark: Option<HookFn>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Default + Clone + 'static> Mapping<T> {
    pub fn new(table: impl Into<TableId>) -> Self {
        Self {
            table: table.into(),
            fields: Vec::new(),
            assocs: Vec::new(),
            hooks: Hooks::default(),
            marks: None,
            unmark: None,
            _entity: PhantomData,
        }
    }

    /// Map a struct field to the column registered under `column` (its alias).
    pub fn field(
        &mut self,
        column: &str,
        get: impl Fn(&T) -> Value + Send + Sync + 'static,
        set: impl Fn(&mut T, Value) -> Result<()> + Send + Sync + 'static,
    ) -> FieldBuilder<'_> {
        let index = self.fields.len();
        self.fields.push(FieldDecl {
            alias: column.to_string(),
            keep_zero: false,
            get: erase_get(get),
            set: erase_set(set),
            to_db: None,
            from_db: None,
        });
        FieldBuilder {
            decl: &mut self.fields[index],
        }
    }

    /// Map a singular reference field to the named association.
    pub fn one<C: 'static>(
        &mut self,
        assoc: &str,
        set: impl Fn(&mut T, C) + Send + Sync + 'static,
    ) -> &mut Self {
        self.assocs.push(AssocDecl {
            name: assoc.to_string(),
            child: TypeId::of::<C>(),
            child_name: std::any::type_name::<C>(),
            attach: erase_attach(set),
        });
        self
    }

    /// Map a collection field to the named association.
    pub fn many<C: 'static>(
        &mut self,
        assoc: &str,
        push: impl Fn(&mut T, C) + Send + Sync + 'static,
    ) -> &mut Self {
        self.one(assoc, push)
    }

    /// Register change tracking: `marks` returns the column aliases modified
    /// since the last `unmark`. Updates submitted for a marked entity only
    /// touch the marked fields.
    pub fn markable(
        &mut self,
        marks: impl Fn(&T) -> Vec<String> + Send + Sync + 'static,
        unmark: impl Fn(&mut T) + Send + Sync + 'static,
    ) -> &mut Self {
        self.marks = Some(Box::new(move |entity| Ok(marks(downcast_ref::<T>(entity)?))));
        self.unmark = Some(Box::new(move |entity| {
            unmark(downcast_mut::<T>(entity)?);
            Ok(())
        }));
        self
    }

    pub fn pre_insert(&mut self, hook: impl Fn(&mut T) -> Result<()> + Send + Sync + 'static) -> &mut Self {
        self.hooks.pre_insert = Some(erase_hook(hook));
        self
    }

    pub fn post_insert(&mut self, hook: impl Fn(&mut T) -> Result<()> + Send + Sync + 'static) -> &mut Self {
        self.hooks.post_insert = Some(erase_hook(hook));
        self
    }

    pub fn pre_update(&mut self, hook: impl Fn(&mut T) -> Result<()> + Send + Sync + 'static) -> &mut Self {
        self.hooks.pre_update = Some(erase_hook(hook));
        self
    }

    pub fn post_update(&mut self, hook: impl Fn(&mut T) -> Result<()> + Send + Sync + 'static) -> &mut Self {
        self.hooks.post_update = Some(erase_hook(hook));
        self
    }

    pub fn pre_delete(&mut self, hook: impl Fn(&mut T) -> Result<()> + Send + Sync + 'static) -> &mut Self {
        self.hooks.pre_delete = Some(erase_hook(hook));
        self
    }

    pub fn post_delete(&mut self, hook: impl Fn(&mut T) -> Result<()> + Send + Sync + 'static) -> &mut Self {
        self.hooks.post_delete = Some(erase_hook(hook));
        self
    }

    pub fn post_retrieve(&mut self, hook: impl Fn(&mut T) -> Result<()> + Send + Sync + 'static) -> &mut Self {
        self.hooks.post_retrieve = Some(erase_hook(hook));
        self
    }

    pub(crate) fn declare(self) -> Declared {
        Declared {
            entity: TypeId::of::<T>(),
            entity_name: std::any::type_name::<T>(),
            table: self.table,
            fields: self.fields,
            assocs: self.assocs,
            hooks: self.hooks,
            marks: self.marks,
            unmark: self.unmark,
            new_fn: Box::new(|| Box::new(T::default())),
            clone_fn: Box::new(|entity| {
                Ok(Box::new(downcast_ref::<T>(entity)?.clone()) as Box<dyn Any>)
            }),
        }
    }
}

/// Options for a field declaration, settable after `Mapping::field`.
pub struct FieldBuilder<'a> {
    decl: &'a mut FieldDecl,
}

impl FieldBuilder<'_> {
    /// Include the field in updates even when its value is unset.
    pub fn keep_zero(&mut self) -> &mut Self {
        self.decl.keep_zero = true;
        self
    }

    /// Convert between the field representation and the stored value:
    /// `to_db` applies on the way into a statement, `from_db` on the way out
    /// of a result row.
    pub fn convert(
        &mut self,
        to_db: impl Fn(Value) -> Value + Send + Sync + 'static,
        from_db: impl Fn(Value) -> Value + Send + Sync + 'static,
    ) -> &mut Self {
        self.decl.to_db = Some(Box::new(to_db));
        self.decl.from_db = Some(Box::new(from_db));
        self
    }
}

fn downcast_ref<T: 'static>(entity: &dyn Any) -> Result<&T> {
    entity
        .downcast_ref::<T>()
        .ok_or_else(|| type_mismatch::<T>())
}

fn downcast_mut<T: 'static>(entity: &mut dyn Any) -> Result<&mut T> {
    entity
        .downcast_mut::<T>()
        .ok_or_else(|| type_mismatch::<T>())
}

fn type_mismatch<T>() -> Error {
    err!("entity type mismatch: expected `{}`", std::any::type_name::<T>())
}

fn erase_get<T: 'static>(get: impl Fn(&T) -> Value + Send + Sync + 'static) -> GetFn {
    Box::new(move |entity| Ok(get(downcast_ref::<T>(entity)?)))
}

fn erase_set<T: 'static>(
    set: impl Fn(&mut T, Value) -> Result<()> + Send + Sync + 'static,
) -> SetFn {
    Box::new(move |entity, value| set(downcast_mut::<T>(entity)?, value))
}

fn erase_hook<T: 'static>(hook: impl Fn(&mut T) -> Result<()> + Send + Sync + 'static) -> HookFn {
    Box::new(move |entity| hook(downcast_mut::<T>(entity)?))
}

fn erase_attach<T: 'static, C: 'static>(
    attach: impl Fn(&mut T, C) + Send + Sync + 'static,
) -> AttachFn {
    Box::new(move |parent, child| {
        let child = child.downcast::<C>().map_err(|_| type_mismatch::<C>())?;
        attach(downcast_mut::<T>(parent)?, *child);
        Ok(())
    })
}
