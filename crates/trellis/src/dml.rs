mod base;
pub(crate) use base::DmlBase;

mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod query;
pub use query::{JoinDirective, Query};

mod update;
pub use update::Update;
