mod render;
pub use render::{ArgSlot, Rendered, Renderer};

mod translator;
pub use translator::{Ansi, AutoKeyStrategy, Translator};
