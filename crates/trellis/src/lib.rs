pub mod db;
pub use db::Db;

pub mod dml;
pub use dml::{Delete, Insert, Query, Update};

pub mod join;

pub mod load;

pub mod mapping;
pub use mapping::Mapping;

pub use trellis_core::{driver, schema, stmt, Connection, Error, Registry, Result};

pub use trellis_sql::{Ansi, AutoKeyStrategy, Translator};
