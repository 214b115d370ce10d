//! Quote Garden WASM - extension surface API
//!
//! Use-case calls for the new-tab dashboard, popup, garden page and
//! background worker. Every export is non-throwing: reads fall back to
//! defaults and writes report through [`ActionResponse`]. Calls that touch
//! storage return promises, since `chrome.storage.local` is promise based.
//!
//! ## Usage in JavaScript
//!
//! ```javascript
//! import init, { init_surface, open_dashboard, capture_selection } from 'quote-garden';
//!
//! await init();
//! init_surface("info");
//!
//! // background worker, context-menu click
//! if (await capture_selection(info.menuItemId, info.selectionText)) {
//!     chrome.action.openPopup();
//! }
//!
//! // new tab
//! const dashboard = await open_dashboard();
//! const quote = await dashboard.daily_quote();
//! ```
//!
//! ## Build
//!
//! ```bash
//! wasm-pack build crates/quote_garden_wasm --target web --out-dir pkg
//! ```

mod browser_store;
mod console_log;
mod extension_store;
mod surface;

use js_sys::Promise;
use log::{info, warn};
use quote_garden_core::repo::draft_repo::DraftRepository;
use quote_garden_core::repo::theme_repo::ThemeRepository;
use quote_garden_core::repo::RepoResult;
use quote_garden_core::service::capture::{handle_menu_click, plant_quote_menu, CaptureOutcome};
use quote_garden_core::service::dashboard::ThemeChoice;
use quote_garden_core::store::StoreResult;
use quote_garden_core::{DashboardSession, FocusTick, Quote, QuoteService, Theme};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

#[cfg(feature = "console_error_panic_hook")]
fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

// ============================================================================
// Types
// ============================================================================

/// One quote as shown by a surface.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteView {
    text: String,
    author: String,
}

#[wasm_bindgen]
impl QuoteView {
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn author(&self) -> String {
        self.author.clone()
    }

    /// Clipboard text for the copy button.
    pub fn share_text(&self) -> String {
        Quote::new(self.text.as_str(), self.author.as_str()).share_text()
    }
}

impl From<Quote> for QuoteView {
    fn from(value: Quote) -> Self {
        Self {
            text: value.text,
            author: value.author,
        }
    }
}

/// Outcome envelope for write calls.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    ok: bool,
    message: String,
}

#[wasm_bindgen]
impl ActionResponse {
    #[wasm_bindgen(getter)]
    pub fn ok(&self) -> bool {
        self.ok
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }

    fn from_result<T>(action: &str, result: RepoResult<T>) -> Self {
        match result {
            Ok(_) => Self::success(format!("{action} ok")),
            Err(err) => Self::failure(format!("{action} failed: {err}")),
        }
    }

    /// Folds the commit outcome of a surface write into the envelope.
    fn from_write<T>(action: &str, result: StoreResult<RepoResult<T>>) -> Self {
        match result {
            Ok(result) => Self::from_result(action, result),
            Err(err) => Self::failure(format!("{action} failed: {err}")),
        }
    }
}

fn optional<T: Into<JsValue>>(value: Option<T>) -> JsValue {
    value.map_or(JsValue::UNDEFINED, Into::into)
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

#[derive(serde::Serialize)]
struct ThemeChoiceJson {
    id: &'static str,
    name: &'static str,
    active: bool,
}

fn theme_choices_json(choices: Vec<ThemeChoice>) -> String {
    let choices: Vec<ThemeChoiceJson> = choices
        .into_iter()
        .map(|choice| ThemeChoiceJson {
            id: choice.theme.id(),
            name: choice.theme.display_name(),
            active: choice.active,
        })
        .collect();
    to_json(&choices)
}

// ============================================================================
// Surface bootstrap
// ============================================================================

/// Sets up console logging and selects this surface's store.
///
/// Returns an empty string on success, otherwise the error message.
#[wasm_bindgen]
pub fn init_surface(log_level: String) -> String {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    if let Err(err) = console_log::init_console_logging(&log_level) {
        return err;
    }
    let backend = surface::backend();
    info!(
        "event=surface_init module=wasm status=ok backend={} version={}",
        backend.name(),
        quote_garden_core::core_version()
    );
    String::new()
}

/// Whether storage is session-only on this surface.
#[wasm_bindgen]
pub fn store_is_fallback() -> bool {
    surface::backend().is_fallback()
}

/// Selected backend: `extension`, `local_storage` or `memory`.
#[wasm_bindgen]
pub fn store_backend() -> String {
    surface::backend().name().to_string()
}

// ============================================================================
// Quotes
// ============================================================================

/// Merged quote list as a JSON array of `{text, author}`.
#[wasm_bindgen]
pub async fn all_quotes_json() -> String {
    surface::read(|store| to_json(&QuoteService::new(store).all_quotes())).await
}

/// User quotes as a JSON array of `{text, author}`.
#[wasm_bindgen]
pub async fn user_quotes_json() -> String {
    surface::read(|store| to_json(&QuoteService::new(store).user_quotes())).await
}

/// Garden gallery contents as a JSON string, or `undefined` to keep the
/// placeholder.
#[wasm_bindgen]
pub async fn garden_quotes_json() -> JsValue {
    let garden = surface::read(|store| QuoteService::new(store).garden_quotes()).await;
    optional(garden.map(|quotes| to_json(&quotes)))
}

/// Today's quote as a [`QuoteView`].
#[wasm_bindgen]
pub async fn daily_quote() -> JsValue {
    let quote = surface::read(|store| QuoteService::new(store).daily_quote()).await;
    optional(quote.ok().map(QuoteView::from))
}

/// Saves a quote from the popup or the dashboard plant form.
#[wasm_bindgen]
pub async fn plant_quote(text: String, author: String) -> ActionResponse {
    let result = surface::write(|store| QuoteService::new(store).plant_quote(&text, &author)).await;
    ActionResponse::from_write("plant_quote", result)
}

// ============================================================================
// Capture
// ============================================================================

/// Context-menu entry to register on install, as `{id, title, contexts}`.
#[wasm_bindgen]
pub fn plant_quote_menu_json() -> String {
    let menu = plant_quote_menu();
    to_json(&serde_json::json!({
        "id": menu.id,
        "title": menu.title,
        "contexts": menu.contexts,
    }))
}

/// Handles a context-menu click; resolves `true` once the draft is stored
/// and the popup should open.
#[wasm_bindgen]
pub async fn capture_selection(menu_item_id: String, selection_text: Option<String>) -> bool {
    let result = surface::write(|store| {
        handle_menu_click(store, &menu_item_id, selection_text.as_deref())
    })
    .await;
    match result {
        Ok(Ok(outcome)) => outcome == CaptureOutcome::OpenPopup,
        Ok(Err(err)) => {
            warn!("event=capture_stage module=wasm status=error error={err}");
            false
        }
        Err(err) => {
            warn!("event=capture_stage module=wasm status=error error={err}");
            false
        }
    }
}

/// Consumes the staged draft, if any. The popup reads the page selection
/// itself when this resolves to `undefined`.
#[wasm_bindgen]
pub async fn take_draft() -> JsValue {
    match surface::write(|store| DraftRepository::new(store).take()).await {
        Ok(draft) => optional(draft),
        Err(err) => {
            warn!("event=draft_take module=wasm status=error error={err}");
            JsValue::UNDEFINED
        }
    }
}

// ============================================================================
// Themes
// ============================================================================

/// Saved theme id (`paper` by default).
#[wasm_bindgen]
pub async fn saved_theme() -> String {
    surface::read(|store| ThemeRepository::new(store).load().id().to_string()).await
}

/// `data-theme` value for `theme_id`; `undefined` means remove the attribute.
/// Any id other than `paper` is applied as given, known or not.
#[wasm_bindgen]
pub fn theme_attribute(theme_id: String) -> Option<String> {
    Theme::attribute_for_id(&theme_id).map(str::to_string)
}

// ============================================================================
// Dashboard
// ============================================================================

/// Opens the new-tab dashboard with the saved theme. Call once per tab.
#[wasm_bindgen]
pub async fn open_dashboard() -> Dashboard {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    let session = surface::read(|store| DashboardSession::open(store)).await;
    Dashboard {
        session: Rc::new(RefCell::new(session)),
    }
}

/// New-tab dashboard state, created by [`open_dashboard`].
#[wasm_bindgen]
pub struct Dashboard {
    session: Rc<RefCell<DashboardSession>>,
}

#[wasm_bindgen]
impl Dashboard {
    #[wasm_bindgen(getter)]
    pub fn day_key(&self) -> String {
        self.session.borrow().day_key().to_string()
    }

    /// Resolves to today's [`QuoteView`], or `undefined`.
    pub fn daily_quote(&self) -> Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move {
            let quote = surface::read(|store| session.borrow().daily_quote(store)).await;
            Ok(optional(quote.ok().map(QuoteView::from)))
        })
    }

    #[wasm_bindgen(getter)]
    pub fn theme(&self) -> String {
        self.session.borrow().theme().id().to_string()
    }

    pub fn theme_attribute(&self) -> Option<String> {
        self.session
            .borrow()
            .theme()
            .data_theme_attribute()
            .map(str::to_string)
    }

    /// JSON array of `{id, name, active}` for the settings grid.
    pub fn theme_choices_json(&self) -> String {
        theme_choices_json(self.session.borrow().theme_choices())
    }

    /// Resolves to an [`ActionResponse`].
    pub fn choose_theme(&self, theme_id: String) -> Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move {
            let Some(theme) = Theme::from_id(&theme_id) else {
                let response = ActionResponse::failure(format!("unknown theme: {theme_id}"));
                return Ok(JsValue::from(response));
            };
            let result =
                surface::write(|store| session.borrow_mut().choose_theme(store, theme)).await;
            Ok(JsValue::from(ActionResponse::from_write("choose_theme", result)))
        })
    }

    /// Resolves to today's journal text, or `undefined`.
    pub fn journal_text(&self) -> Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move {
            let text = surface::read(|store| session.borrow().journal_text(store)).await;
            Ok(optional(text))
        })
    }

    /// Resolves to an [`ActionResponse`].
    pub fn save_journal(&self, text: String) -> Promise {
        let session = Rc::clone(&self.session);
        future_to_promise(async move {
            let result = surface::write(|store| session.borrow().save_journal(store, &text)).await;
            Ok(JsValue::from(ActionResponse::from_write("save_journal", result)))
        })
    }

    pub fn focus_start(&self) {
        self.session.borrow_mut().focus_mut().start();
    }

    /// One-second step. Returns the flower when the session completes.
    pub fn focus_tick(&self) -> Option<String> {
        match self
            .session
            .borrow_mut()
            .focus_mut()
            .tick(js_sys::Math::random())
        {
            FocusTick::Completed(flower) => Some(flower.to_string()),
            FocusTick::Running | FocusTick::Paused => None,
        }
    }

    pub fn focus_stop(&self) {
        self.session.borrow_mut().focus_mut().stop();
    }

    pub fn focus_reset_after_bloom(&self) {
        self.session.borrow_mut().focus_mut().reset_after_bloom();
    }

    #[wasm_bindgen(getter)]
    pub fn focus_growing(&self) -> bool {
        self.session.borrow().focus().is_growing()
    }

    pub fn focus_display(&self) -> String {
        self.session.borrow().focus().display()
    }

    pub fn focus_status(&self) -> Option<String> {
        self.session
            .borrow()
            .focus()
            .status_message()
            .map(str::to_string)
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::{capture_selection, store_backend, store_is_fallback, take_draft};
    use quote_garden_core::service::capture::PLANT_QUOTE_MENU_ID;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn surface_store_is_durable_in_a_browser() {
        assert!(!store_is_fallback());
        assert_eq!(store_backend(), store_backend());
    }

    #[wasm_bindgen_test]
    async fn draft_is_taken_once_through_the_exports() {
        assert!(!capture_selection("other-menu".to_string(), Some("ignored".to_string())).await);
        assert!(capture_selection(PLANT_QUOTE_MENU_ID.to_string(), Some(" seen ".to_string())).await);

        assert_eq!(take_draft().await.as_string().as_deref(), Some("seen"));
        assert!(take_draft().await.is_undefined());
    }
}
