use super::Db;
use crate::mapping::{Declared, Mapping, Mappings};

use trellis_core::{err, Registry, Result};
use trellis_sql::{Ansi, Translator};

/// Assembles a [`Db`]: a registry, a translator, and entity mappings.
///
/// Mappings are declared in any order; cross-entity references (association
/// children) resolve when [`build`](Builder::build) runs them against the
/// registry.
pub struct Builder {
    registry: Option<Registry>,
    translator: Box<dyn Translator + Send + Sync>,
    declared: Vec<Declared>,
}

impl Default for Builder {
    fn default() -> Builder {
        Builder {
            registry: None,
            translator: Box::new(Ansi),
            declared: Vec::new(),
        }
    }
}

impl Builder {
    /// The schema registry to resolve mappings and render statements against.
    pub fn registry(&mut self, registry: Registry) -> &mut Self {
        self.registry = Some(registry);
        self
    }

    /// The SQL dialect. Defaults to [`Ansi`].
    pub fn translator(
        &mut self,
        translator: impl Translator + Send + Sync + 'static,
    ) -> &mut Self {
        self.translator = Box::new(translator);
        self
    }

    /// Declare how an entity type maps onto its table.
    pub fn register<T: Default + Clone + 'static>(&mut self, mapping: Mapping<T>) -> &mut Self {
        self.declared.push(mapping.declare());
        self
    }

    pub fn build(&mut self) -> Result<Db> {
        let registry = match self.registry.take() {
            Some(registry) => registry,
            None => return Err(err!("building a `Db` requires a registry")),
        };
        let declared = std::mem::take(&mut self.declared);
        let translator = std::mem::replace(&mut self.translator, Box::new(Ansi));
        let mappings = Mappings::resolve(declared, &registry)?;

        Ok(Db {
            registry,
            translator,
            mappings,
        })
    }
}
