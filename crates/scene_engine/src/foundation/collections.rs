//! Specialized collection types

use indexmap::IndexMap;

pub use slotmap::{SlotMap, new_key_type};

/// Insertion-ordered registry keyed by unique name
///
/// Per-scene lists and scenes themselves live in one of these so they can be
/// addressed either by name or by registration index.
#[derive(Debug, Clone)]
pub struct NamedRegistry<T> {
    entries: IndexMap<String, T>,
}

impl<T> Default for NamedRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NamedRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert `value` under `name`
    ///
    /// Returns the value back when the name is already taken; the existing
    /// entry is left untouched.
    pub fn insert(&mut self, name: impl Into<String>, value: T) -> Result<usize, T> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(value);
        }
        let (index, _) = self.entries.insert_full(name, value);
        Ok(index)
    }

    /// Whether an entry with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Look up by name
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    /// Look up by name, mutably
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(name)
    }

    /// Look up by registration index
    pub fn get_index(&self, index: usize) -> Option<(&str, &T)> {
        self.entries.get_index(index).map(|(k, v)| (k.as_str(), v))
    }

    /// Look up by registration index, mutably
    pub fn get_index_mut(&mut self, index: usize) -> Option<(&str, &mut T)> {
        self.entries.get_index_mut(index).map(|(k, v)| (k.as_str(), v))
    }

    /// Remove by name, keeping the order of the remaining entries
    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.entries.shift_remove(name)
    }

    /// Remove by index, keeping the order of the remaining entries
    pub fn remove_index(&mut self, index: usize) -> Option<(String, T)> {
        self.entries.shift_remove_index(index)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate entries mutably in registration order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut T)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = NamedRegistry::new();
        assert_eq!(registry.insert("a", 1), Ok(0));
        assert_eq!(registry.insert("a", 2), Err(2));
        assert_eq!(registry.get("a"), Some(&1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut registry = NamedRegistry::new();
        registry.insert("a", 1).ok();
        registry.insert("b", 2).ok();
        registry.insert("c", 3).ok();
        assert_eq!(registry.remove_index(0), Some(("a".to_string(), 1)));
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["b", "c"]);
        assert_eq!(registry.get_index(1), Some(("c", &3)));
    }
}
