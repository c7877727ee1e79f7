mod assoc;
pub use assoc::{Assoc, AssocId, Many2Many, Relation};

mod builder;
pub use builder::{ColumnBuilder, RegistryBuilder, TableBuilder};

mod column;
pub use column::{Column, ColumnId, VirtualRef};

mod discriminator;
pub use discriminator::Discriminator;

mod registry;
pub use registry::Registry;

mod table;
pub use table::{Table, TableId};
