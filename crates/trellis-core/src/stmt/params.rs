use super::*;

use indexmap::IndexMap;

/// Named parameter bindings for one statement, in insertion order.
///
/// Order matters: renderers walk this map to produce the positional argument
/// list matching the placeholders they emit.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params {
    entries: IndexMap<String, Value>,
}

impl Params {
    pub fn new() -> Params {
        Params::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Fold `other` into this set, renaming colliding names by suffixing
    /// `_2`, `_3`, ... until free. Returns the renames applied so the caller
    /// can rewrite the matching [`ExprParam`] nodes.
    pub fn absorb(&mut self, other: Params) -> Vec<(String, String)> {
        let mut renames = vec![];

        for (name, value) in other.entries {
            if !self.entries.contains_key(&name) {
                self.entries.insert(name, value);
                continue;
            }

            let mut n = 2;
            let fresh = loop {
                let candidate = format!("{name}_{n}");
                if !self.entries.contains_key(&candidate) {
                    break candidate;
                }
                n += 1;
            };

            self.entries.insert(fresh.clone(), value);
            renames.push((name, fresh));
        }

        renames
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.bind(name, value);
        }
        params
    }
}
