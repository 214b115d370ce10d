//! Single pending capture staged between the context menu and the popup.

use crate::repo::RepoResult;
use crate::store::{PersistentStore, DRAFT_QUOTE_KEY};
use log::{info, warn};
use serde_json::Value;

pub struct DraftRepository<'s, S: PersistentStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: PersistentStore + ?Sized> DraftRepository<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Stages trimmed `text`, replacing any previous draft.
    ///
    /// Returns `false` (and stages nothing) when `text` is blank.
    pub fn stage(&self, text: &str) -> RepoResult<bool> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        self.store
            .set_one(DRAFT_QUOTE_KEY, Value::String(trimmed.to_string()))?;
        info!(
            "event=draft_stage module=repo status=ok chars={}",
            trimmed.chars().count()
        );
        Ok(true)
    }

    /// Reads and deletes the draft. A second call returns `None`.
    pub fn take(&self) -> Option<String> {
        let value = match self.store.get_one(DRAFT_QUOTE_KEY) {
            Ok(value) => value?,
            Err(err) => {
                warn!("event=draft_take module=repo status=degraded error={err}");
                return None;
            }
        };

        let draft = match value {
            Value::String(text) if text.is_empty() => return None,
            Value::String(text) => Some(text),
            _ => {
                warn!("event=draft_take module=repo status=invalid reason=not_a_string");
                None
            }
        };

        if let Err(err) = self.store.remove(DRAFT_QUOTE_KEY) {
            warn!("event=draft_remove module=repo status=error error={err}");
        }
        draft
    }
}
