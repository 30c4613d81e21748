//! Persistence seam
//!
//! The engine persists serialized themes through [`ThemeStorage`], a
//! namespaced string key/value interface. Hosts back it with whatever
//! store they have; [`MemoryStorage`] ships for tests and hosts
//! without persistence.

use rustc_hash::FxHashMap;

/// Namespaced string key/value store for serialized themes.
pub trait ThemeStorage {
    fn load(&self, namespace: &str, key: &str) -> Option<String>;
    fn save(&mut self, namespace: &str, key: &str, value: &str);
    fn delete(&mut self, namespace: &str, key: &str);
}

/// In-memory [`ThemeStorage`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: FxHashMap<(String, String), String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ThemeStorage for MemoryStorage {
    fn load(&self, namespace: &str, key: &str) -> Option<String> {
        self.entries
            .get(&(namespace.to_owned(), key.to_owned()))
            .cloned()
    }

    fn save(&mut self, namespace: &str, key: &str, value: &str) {
        self.entries
            .insert((namespace.to_owned(), key.to_owned()), value.to_owned());
    }

    fn delete(&mut self, namespace: &str, key: &str) {
        self.entries.remove(&(namespace.to_owned(), key.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_delete() {
        let mut storage = MemoryStorage::new();
        assert!(storage.load("themes", "local").is_none());

        storage.save("themes", "local", "{}");
        assert_eq!(storage.load("themes", "local").as_deref(), Some("{}"));

        // Namespaces do not bleed into each other.
        assert!(storage.load("other", "local").is_none());

        storage.delete("themes", "local");
        assert!(storage.load("themes", "local").is_none());
        assert!(storage.is_empty());
    }
}
