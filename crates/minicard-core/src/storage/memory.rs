use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::Result;

/// In-process key-value store, used for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a slot without counting it as a write
    #[must_use]
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of successful `set` calls so far
    #[must_use]
    pub const fn write_count(&self) -> usize {
        self.writes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.slots.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_value_and_counts_write() {
        let mut storage = MemoryStorage::new();
        storage.set("appState", "{}").unwrap();
        assert_eq!(storage.get("appState").unwrap().as_deref(), Some("{}"));
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn clear_drops_all_slots() {
        let mut storage = MemoryStorage::new().with_entry("a", "1").with_entry("b", "2");
        storage.clear().unwrap();
        assert!(storage.is_empty());
        assert_eq!(storage.get("a").unwrap(), None);
    }
}
