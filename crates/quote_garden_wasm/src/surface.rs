//! Store selection for one surface, and the read/write wrappers every export
//! goes through.
//!
//! The backend is picked on first use and kept for the life of the page or
//! worker: `chrome.storage.local` when the extension API exists, otherwise
//! `localStorage`, otherwise memory.

use crate::browser_store::BrowserStore;
use crate::extension_store::ExtensionStore;
use log::{info, warn};
use once_cell::unsync::OnceCell;
use quote_garden_core::store::{PersistentStore, SelectedStore, StagedStore, StoreResult};
use std::rc::Rc;

#[derive(Debug)]
pub enum SurfaceBackend {
    /// Shared by every surface of the installed extension.
    Extension(ExtensionStore),
    /// Page opened outside the extension.
    Page(SelectedStore<BrowserStore>),
}

impl SurfaceBackend {
    fn select() -> Self {
        match ExtensionStore::detect() {
            Some(extension) => {
                info!("event=store_select module=surface status=ok backend=extension");
                Self::Extension(extension)
            }
            None => Self::Page(SelectedStore::select(BrowserStore::from_window())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Extension(_) => "extension",
            Self::Page(store) if store.is_fallback() => "memory",
            Self::Page(_) => "local_storage",
        }
    }

    /// Whether stored data ends with this page.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Page(store) if store.is_fallback())
    }
}

thread_local! {
    static BACKEND: OnceCell<Rc<SurfaceBackend>> = OnceCell::new();
}

/// This surface's backend, selected on the first call.
pub fn backend() -> Rc<SurfaceBackend> {
    BACKEND.with(|cell| Rc::clone(cell.get_or_init(|| Rc::new(SurfaceBackend::select()))))
}

/// Runs a read. When the extension store cannot be loaded, `op` sees empty
/// storage and the caller gets its defaults.
pub async fn read<T>(op: impl FnOnce(&dyn PersistentStore) -> T) -> T {
    let backend = backend();
    match &*backend {
        SurfaceBackend::Extension(extension) => {
            let staged = extension.snapshot().await.unwrap_or_else(|err| {
                warn!("event=surface_read module=surface status=degraded error={err}");
                StagedStore::default()
            });
            op(&staged as &dyn PersistentStore)
        }
        SurfaceBackend::Page(store) => op(store as &dyn PersistentStore),
    }
}

/// Runs a write. On the extension store, `op` only runs once the snapshot
/// loaded, and its changes are committed before this returns.
pub async fn write<T>(op: impl FnOnce(&dyn PersistentStore) -> T) -> StoreResult<T> {
    let backend = backend();
    match &*backend {
        SurfaceBackend::Extension(extension) => {
            let staged = extension.snapshot().await?;
            let outcome = op(&staged as &dyn PersistentStore);
            extension.commit(staged.into_changes()).await?;
            Ok(outcome)
        }
        SurfaceBackend::Page(store) => Ok(op(store as &dyn PersistentStore)),
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::{backend, read, write};
    use quote_garden_core::store::PersistentStore;
    use serde_json::json;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn backend_is_selected_once() {
        let first = backend();
        let second = backend();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(first.name(), second.name());
        assert!(!first.is_fallback());
    }

    #[wasm_bindgen_test]
    async fn writes_are_visible_to_later_reads() {
        write(|store| store.set_one("sf_value", json!("kept")))
            .await
            .unwrap()
            .unwrap();
        let value = read(|store| store.get_one("sf_value")).await.unwrap();
        assert_eq!(value, Some(json!("kept")));

        write(|store| store.remove("sf_value")).await.unwrap().unwrap();
        let value = read(|store| store.get_one("sf_value")).await.unwrap();
        assert_eq!(value, None);
    }
}
