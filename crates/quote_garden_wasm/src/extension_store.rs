//! Host store over `chrome.storage.local`, shared by every surface of the
//! extension (background worker, popup, new tab, garden page).
//!
//! The API is promise based, so calls are staged: [`ExtensionStore::snapshot`]
//! loads the stored entries into a [`StagedStore`], core logic runs against
//! it, and [`ExtensionStore::commit`] writes back only what changed. Values
//! cross the boundary as JSON.

use crate::browser_store::rejected;
use js_sys::{Array, Object, Promise, Reflect, JSON};
use log::warn;
use quote_garden_core::store::{StagedChanges, StagedStore, StoreMap, StoreResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
    fn storage_local_get(keys: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    fn storage_local_set(items: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = remove)]
    fn storage_local_remove(keys: &JsValue) -> Result<Promise, JsValue>;
}

#[derive(Debug, Clone, Copy)]
pub struct ExtensionStore;

impl ExtensionStore {
    /// `Some` when `chrome.storage.local` exists in this global scope.
    pub fn detect() -> Option<Self> {
        let mut node: JsValue = js_sys::global().into();
        for name in ["chrome", "storage", "local"] {
            node = Reflect::get(&node, &JsValue::from_str(name)).ok()?;
            if node.is_undefined() || node.is_null() {
                return None;
            }
        }
        Some(Self)
    }

    /// Loads every stored entry into a working copy.
    pub async fn snapshot(&self) -> StoreResult<StagedStore> {
        let promise = storage_local_get(&JsValue::NULL).map_err(|err| rejected("get", err))?;
        let items = JsFuture::from(promise)
            .await
            .map_err(|err| rejected("get", err))?;
        Ok(StagedStore::new(decode_items(&items)))
    }

    /// Writes back the changes recorded on a working copy.
    pub async fn commit(&self, changes: StagedChanges) -> StoreResult<()> {
        if !changes.set.is_empty() {
            let text = serde_json::to_string(&changes.set)?;
            let items = JSON::parse(&text).map_err(|err| rejected("set", err))?;
            let promise = storage_local_set(&items).map_err(|err| rejected("set", err))?;
            JsFuture::from(promise)
                .await
                .map_err(|err| rejected("set", err))?;
        }
        if !changes.removed.is_empty() {
            let keys: Array = changes
                .removed
                .iter()
                .map(|key| JsValue::from_str(key))
                .collect();
            let promise = storage_local_remove(&keys).map_err(|err| rejected("remove", err))?;
            JsFuture::from(promise)
                .await
                .map_err(|err| rejected("remove", err))?;
        }
        Ok(())
    }
}

fn decode_items(items: &JsValue) -> StoreMap {
    let mut found = StoreMap::new();
    let Some(items) = items.dyn_ref::<Object>() else {
        return found;
    };

    for entry in Object::entries(items).iter() {
        let pair = Array::from(&entry);
        let Some(key) = pair.get(0).as_string() else {
            continue;
        };
        match decode_value(&pair.get(1)) {
            Some(value) => {
                found.insert(key, value);
            }
            None => {
                warn!("event=store_decode module=extension_store status=skipped key={key}");
            }
        }
    }
    found
}

fn decode_value(value: &JsValue) -> Option<serde_json::Value> {
    let text = JSON::stringify(value).ok().map(JsValue::from)?.as_string()?;
    serde_json::from_str(&text).ok()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::ExtensionStore;
    use quote_garden_core::repo::draft_repo::DraftRepository;
    use quote_garden_core::store::PersistentStore;
    use serde_json::json;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Installs an in-page `chrome.storage.local` with the promise API.
    fn install_storage_area() {
        js_sys::eval(
            r#"(() => {
                const root = globalThis.chrome || (globalThis.chrome = {});
                if (root.storage && root.storage.local) return;
                const data = new Map();
                const list = (keys) => keys === null || keys === undefined
                    ? [...data.keys()]
                    : [].concat(keys);
                root.storage = { local: {
                    __data: data,
                    get(keys) {
                        const out = {};
                        for (const key of list(keys)) {
                            if (data.has(key)) out[key] = data.get(key);
                        }
                        return Promise.resolve(out);
                    },
                    set(items) {
                        for (const [key, value] of Object.entries(items)) data.set(key, value);
                        return Promise.resolve();
                    },
                    remove(keys) {
                        for (const key of [].concat(keys)) data.delete(key);
                        return Promise.resolve();
                    },
                } };
            })()"#,
        )
        .unwrap();
    }

    #[wasm_bindgen_test]
    async fn committed_changes_reach_a_later_snapshot() {
        install_storage_area();
        let store = ExtensionStore::detect().unwrap();

        let background = store.snapshot().await.unwrap();
        assert!(DraftRepository::new(&background).stage(" seen ").unwrap());
        store.commit(background.into_changes()).await.unwrap();

        let popup = store.snapshot().await.unwrap();
        assert_eq!(DraftRepository::new(&popup).take().as_deref(), Some("seen"));
        store.commit(popup.into_changes()).await.unwrap();

        let reopened = store.snapshot().await.unwrap();
        assert_eq!(DraftRepository::new(&reopened).take(), None);
    }

    #[wasm_bindgen_test]
    async fn snapshot_follows_store_contract() {
        install_storage_area();
        let store = ExtensionStore::detect().unwrap();

        let staged = store.snapshot().await.unwrap();
        staged.set_one("es_value", json!({ "k": [1, 2] })).unwrap();
        staged.remove("es_never_written").unwrap();
        store.commit(staged.into_changes()).await.unwrap();

        let reread = store.snapshot().await.unwrap();
        let found = reread.get(&["es_value", "es_never_written"]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["es_value"], json!({ "k": [1, 2] }));
    }

    #[wasm_bindgen_test]
    async fn non_json_value_only_hides_its_own_key() {
        install_storage_area();
        js_sys::eval(
            r#"chrome.storage.local.__data.set("es_bad", () => 1);
               chrome.storage.local.__data.set("es_good", "fine");"#,
        )
        .unwrap();
        let store = ExtensionStore::detect().unwrap();

        let staged = store.snapshot().await.unwrap();
        let found = staged.get(&["es_bad", "es_good"]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["es_good"], json!("fine"));
    }
}
