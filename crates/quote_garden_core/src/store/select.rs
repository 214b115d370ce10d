//! One-time backend selection for a surface.

use super::{MemoryStore, PersistentStore, StoreMap, StoreResult};
use log::{info, warn};

#[cfg(feature = "sqlite")]
use super::SqliteStore;
#[cfg(feature = "sqlite")]
use std::path::Path;

/// Store chosen at startup: the host backend when it opened, otherwise the
/// session-scoped fallback. Callers never re-check availability per call.
#[derive(Debug)]
pub enum SelectedStore<H> {
    Host(H),
    Fallback(MemoryStore),
}

impl<H: PersistentStore> SelectedStore<H> {
    /// Picks `host` when present, otherwise a fresh [`MemoryStore`].
    pub fn select(host: Option<H>) -> Self {
        match host {
            Some(host) => {
                info!("event=store_select module=store status=ok backend=host");
                Self::Host(host)
            }
            None => {
                warn!("event=store_select module=store status=degraded backend=memory");
                Self::Fallback(MemoryStore::new())
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    fn inner(&self) -> &dyn PersistentStore {
        match self {
            Self::Host(host) => host,
            Self::Fallback(memory) => memory,
        }
    }
}

impl<H: PersistentStore> PersistentStore for SelectedStore<H> {
    fn get(&self, keys: &[&str]) -> StoreResult<StoreMap> {
        self.inner().get(keys)
    }

    fn set(&self, entries: StoreMap) -> StoreResult<()> {
        self.inner().set(entries)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner().remove(key)
    }
}

/// Opens the native store file, degrading to memory when it cannot be opened.
#[cfg(feature = "sqlite")]
pub fn open_host_store(path: impl AsRef<Path>) -> SelectedStore<SqliteStore> {
    let host = match SqliteStore::open(path) {
        Ok(store) => Some(store),
        Err(err) => {
            warn!("event=store_open module=store status=error backend=sqlite error={err}");
            None
        }
    };
    SelectedStore::select(host)
}

#[cfg(test)]
mod tests {
    use super::SelectedStore;
    use crate::store::{MemoryStore, PersistentStore};
    use serde_json::json;

    #[test]
    fn missing_host_selects_fallback() {
        let store = SelectedStore::<MemoryStore>::select(None);
        assert!(store.is_fallback());

        store.set_one("k", json!("v")).unwrap();
        assert_eq!(store.get_one("k").unwrap(), Some(json!("v")));
    }

    #[test]
    fn present_host_is_used() {
        let host = MemoryStore::new();
        host.set_one("k", json!(7)).unwrap();

        let store = SelectedStore::select(Some(host));
        assert!(!store.is_fallback());
        assert_eq!(store.get_one("k").unwrap(), Some(json!(7)));
    }
}
