//! Working copy of host entries for backends that cannot be called
//! synchronously.
//!
//! A surface loads a snapshot from its host, runs repository calls against
//! the copy, then replays the recorded [`StagedChanges`] on the host. Only
//! keys written or removed during the call are replayed.

use super::{PersistentStore, StoreError, StoreMap, StoreResult};
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

/// Writes recorded by a [`StagedStore`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedChanges {
    /// Last value written per key.
    pub set: StoreMap,
    /// Keys removed. Never overlaps `set`.
    pub removed: BTreeSet<String>,
}

impl StagedChanges {
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.removed.is_empty()
    }

    /// Replays the changes on a synchronous host.
    pub fn apply_to<S: PersistentStore + ?Sized>(self, host: &S) -> StoreResult<()> {
        if !self.set.is_empty() {
            host.set(self.set)?;
        }
        for key in &self.removed {
            host.remove(key)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct StagedState {
    entries: StoreMap,
    changes: StagedChanges,
}

#[derive(Debug, Default)]
pub struct StagedStore {
    state: Mutex<StagedState>,
}

impl StagedStore {
    pub fn new(entries: StoreMap) -> Self {
        Self {
            state: Mutex::new(StagedState {
                entries,
                changes: StagedChanges::default(),
            }),
        }
    }

    /// Copies `keys` out of a synchronous host.
    pub fn load<S: PersistentStore + ?Sized>(host: &S, keys: &[&str]) -> StoreResult<Self> {
        Ok(Self::new(host.get(keys)?))
    }

    /// Consumes the copy, keeping only what changed.
    pub fn into_changes(self) -> StagedChanges {
        match self.state.into_inner() {
            Ok(state) => state.changes,
            Err(poisoned) => poisoned.into_inner().changes,
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, StagedState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("staged store lock poisoned".to_string()))
    }
}

impl PersistentStore for StagedStore {
    fn get(&self, keys: &[&str]) -> StoreResult<StoreMap> {
        let state = self.lock()?;
        Ok(keys
            .iter()
            .filter_map(|key| {
                state
                    .entries
                    .get(*key)
                    .map(|value| ((*key).to_string(), value.clone()))
            })
            .collect())
    }

    fn set(&self, entries: StoreMap) -> StoreResult<()> {
        let mut state = self.lock()?;
        for (key, value) in entries {
            state.changes.removed.remove(&key);
            state.changes.set.insert(key.clone(), value.clone());
            state.entries.insert(key, value);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut state = self.lock()?;
        state.entries.remove(key);
        state.changes.set.remove(key);
        state.changes.removed.insert(key.to_string());
        Ok(())
    }
}
