mod builder;
pub use builder::{FieldBuilder, Mapping};

mod entity;
pub(crate) use entity::{AssocField, Declared, EntityMapping, Field, Hooks};

mod set;
pub(crate) use set::Mappings;
