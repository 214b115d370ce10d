//! Page store over `window.localStorage`, used when the extension storage
//! API is missing.
//!
//! Values are stored as JSON text. localStorage has no batches, so a failing
//! `set` can leave earlier entries of the same call written. An item that is
//! not valid JSON is skipped by `get`; the other keys are still returned.

use log::warn;
use quote_garden_core::store::{PersistentStore, StoreError, StoreMap, StoreResult};
use wasm_bindgen::JsValue;
use web_sys::Storage;

#[derive(Debug)]
pub struct BrowserStore {
    storage: Storage,
}

impl BrowserStore {
    /// `None` when there is no window or localStorage is blocked.
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(Some(storage)) => Some(Self { storage }),
            Ok(None) => None,
            Err(err) => {
                warn!("event=store_probe module=browser_store status=error error={err:?}");
                None
            }
        }
    }
}

pub(crate) fn rejected(op: &'static str, err: JsValue) -> StoreError {
    StoreError::Rejected {
        op,
        message: format!("{err:?}"),
    }
}

impl PersistentStore for BrowserStore {
    fn get(&self, keys: &[&str]) -> StoreResult<StoreMap> {
        let mut found = StoreMap::new();
        for key in keys {
            let raw = self
                .storage
                .get_item(key)
                .map_err(|err| rejected("get", err))?;
            let Some(raw) = raw else {
                continue;
            };
            match serde_json::from_str(&raw) {
                Ok(value) => {
                    found.insert((*key).to_string(), value);
                }
                Err(err) => {
                    warn!("event=store_decode module=browser_store status=skipped key={key} error={err}");
                }
            }
        }
        Ok(found)
    }

    fn set(&self, entries: StoreMap) -> StoreResult<()> {
        let encoded = entries
            .iter()
            .map(|(key, value)| -> StoreResult<(&String, String)> {
                Ok((key, serde_json::to_string(value)?))
            })
            .collect::<StoreResult<Vec<_>>>()?;
        for (key, text) in encoded {
            self.storage
                .set_item(key, &text)
                .map_err(|err| rejected("set", err))?;
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|err| rejected("remove", err))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::BrowserStore;
    use quote_garden_core::store::{PersistentStore, StoreMap};
    use serde_json::json;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fresh_store(keys: &[&str]) -> BrowserStore {
        let store = BrowserStore::from_window().unwrap();
        for key in keys {
            store.storage.remove_item(key).unwrap();
        }
        store
    }

    #[wasm_bindgen_test]
    fn get_omits_missing_keys() {
        let store = fresh_store(&["bs_present", "bs_missing"]);
        store.set_one("bs_present", json!([1, 2])).unwrap();

        let found = store.get(&["bs_present", "bs_missing"]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["bs_present"], json!([1, 2]));
    }

    #[wasm_bindgen_test]
    fn values_are_kept_as_json_text() {
        let store = fresh_store(&["bs_text"]);
        store
            .set(StoreMap::from([("bs_text".to_string(), json!("seen"))]))
            .unwrap();

        assert_eq!(
            store.storage.get_item("bs_text").unwrap().as_deref(),
            Some("\"seen\"")
        );
        assert_eq!(store.get_one("bs_text").unwrap(), Some(json!("seen")));
    }

    #[wasm_bindgen_test]
    fn remove_is_idempotent() {
        let store = fresh_store(&["bs_gone"]);
        store.set_one("bs_gone", json!(true)).unwrap();

        store.remove("bs_gone").unwrap();
        store.remove("bs_gone").unwrap();
        assert_eq!(store.get_one("bs_gone").unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn undecodable_item_only_hides_its_own_key() {
        let store = fresh_store(&["bs_bad", "bs_good"]);
        store.storage.set_item("bs_bad", "{not json").unwrap();
        store.set_one("bs_good", json!("fine")).unwrap();

        let found = store.get(&["bs_bad", "bs_good"]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["bs_good"], json!("fine"));
    }
}
