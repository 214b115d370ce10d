//! One journal entry per calendar day, keyed `journal_<day key>`.

use crate::repo::RepoResult;
use crate::store::{PersistentStore, JOURNAL_KEY_PREFIX};
use log::{info, warn};
use serde_json::Value;

/// Store key for the entry written on `day_key`.
pub fn journal_key(day_key: &str) -> String {
    format!("{JOURNAL_KEY_PREFIX}{day_key}")
}

pub struct JournalRepository<'s, S: PersistentStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: PersistentStore + ?Sized> JournalRepository<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Entry for `day_key`; empty or unreadable entries read as `None`.
    pub fn load(&self, day_key: &str) -> Option<String> {
        match self.store.get_one(&journal_key(day_key)) {
            Ok(Some(Value::String(text))) if !text.is_empty() => Some(text),
            Ok(_) => None,
            Err(err) => {
                warn!("event=journal_load module=repo status=degraded error={err}");
                None
            }
        }
    }

    /// Overwrites the entry for `day_key`.
    pub fn save(&self, day_key: &str, text: &str) -> RepoResult<()> {
        self.store
            .set_one(&journal_key(day_key), Value::String(text.to_string()))?;
        info!(
            "event=journal_save module=repo status=ok chars={}",
            text.chars().count()
        );
        Ok(())
    }
}
