mod alias_bag;
pub use alias_bag::AliasBag;

mod path;
pub use path::{JoinStep, ResolvedHop};

mod resolver;
pub use resolver::Resolver;
