mod builder;
pub use builder::Builder;

use crate::{
    dml::{Delete, Insert, Query, Update},
    mapping::Mappings,
};

use trellis_core::{Registry, Result};
use trellis_sql::Translator;

/// A configured database front: the schema registry, the SQL dialect, and
/// the resolved entity mappings.
///
/// `Db` holds no connection. Statement builders borrow it to render SQL, and
/// take a [`Connection`](crate::driver::Connection) only at execution time,
/// so one `Db` serves any number of connections and threads.
pub struct Db {
    pub(crate) registry: Registry,
    pub(crate) translator: Box<dyn Translator + Send + Sync>,
    pub(crate) mappings: Mappings,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Start a SELECT for the entity type `T`.
    pub fn query<T: Default + Clone + 'static>(&self) -> Result<Query<'_, T>> {
        Query::new(self)
    }

    /// Start an INSERT into `T`'s table.
    pub fn insert<T: Default + Clone + 'static>(&self) -> Result<Insert<'_, T>> {
        Insert::new(self)
    }

    /// Start an UPDATE of `T`'s table.
    pub fn update<T: Default + Clone + 'static>(&self) -> Result<Update<'_, T>> {
        Update::new(self)
    }

    /// Start a DELETE against `T`'s table.
    pub fn delete<T: Default + Clone + 'static>(&self) -> Result<Delete<'_, T>> {
        Delete::new(self)
    }
}
