use trellis_core::schema::AssocId;

use indexmap::IndexMap;

/// Mints and remembers table aliases for resolved association hops.
///
/// One bag lives per statement and is created fresh whenever the statement's
/// base alias is (re)set. An alias is handed out once per association
/// identity and join type, so a second branch through the same association
/// resolves to the alias the first branch received. Minted aliases are the
/// base alias plus an incrementing counter.
pub struct AliasBag {
    prefix: String,
    counter: usize,
    assigned: IndexMap<(AssocId, bool), String>,
}

impl AliasBag {
    pub fn new(prefix: impl Into<String>) -> AliasBag {
        AliasBag {
            prefix: prefix.into(),
            counter: 0,
            assigned: IndexMap::new(),
        }
    }

    /// The alias bound to `assoc`, minting one on first use.
    pub fn alias_of(&mut self, assoc: AssocId, inner: bool) -> String {
        if let Some(alias) = self.assigned.get(&(assoc, inner)) {
            return alias.clone();
        }
        let alias = self.mint();
        self.assigned.insert((assoc, inner), alias.clone());
        alias
    }

    /// Bind a caller-preferred alias, so every later reference to `assoc`
    /// under the same join type resolves to it.
    pub fn put(&mut self, assoc: AssocId, inner: bool, alias: impl Into<String>) {
        self.assigned.insert((assoc, inner), alias.into());
    }

    pub fn get(&self, assoc: AssocId, inner: bool) -> Option<&str> {
        self.assigned.get(&(assoc, inner)).map(String::as_str)
    }

    /// A fresh alias that is not bound to any association. Junction hops use
    /// this so each many-to-many branch walks its own copy of the junction.
    pub fn mint(&mut self) -> String {
        loop {
            self.counter += 1;
            let alias = format!("{}{}", self.prefix, self.counter);
            if !self.in_use(&alias) {
                return alias;
            }
        }
    }

    fn in_use(&self, alias: &str) -> bool {
        alias == self.prefix || self.assigned.values().any(|assigned| assigned == alias)
    }
}
