//! Session-scoped store used when no host storage is available.

use super::{PersistentStore, StoreError, StoreMap, StoreResult};
use std::sync::{Mutex, MutexGuard};

/// In-process map; contents live as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<StoreMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, StoreMap>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, keys: &[&str]) -> StoreResult<StoreMap> {
        let entries = self.lock()?;
        Ok(keys
            .iter()
            .filter_map(|key| {
                entries
                    .get(*key)
                    .map(|value| ((*key).to_string(), value.clone()))
            })
            .collect())
    }

    fn set(&self, entries: StoreMap) -> StoreResult<()> {
        self.lock()?.extend(entries);
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::store::{PersistentStore, StoreMap};
    use serde_json::json;

    #[test]
    fn get_omits_missing_keys() {
        let store = MemoryStore::new();
        store.set_one("a", json!(1)).unwrap();

        let found = store.get(&["a", "b"]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["a"], json!(1));
    }

    #[test]
    fn set_overwrites_and_remove_is_idempotent() {
        let store = MemoryStore::new();
        store
            .set(StoreMap::from([
                ("a".to_string(), json!("one")),
                ("b".to_string(), json!("two")),
            ]))
            .unwrap();
        store.set_one("a", json!("uno")).unwrap();
        assert_eq!(store.get_one("a").unwrap(), Some(json!("uno")));

        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get_one("a").unwrap(), None);
        assert_eq!(store.len(), 1);
    }
}
