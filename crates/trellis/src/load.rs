mod crawler;
pub use crawler::Crawler;

mod tree;
pub(crate) use tree::transform;
