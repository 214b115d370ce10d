//! Capture flow: context-menu staging and popup prefill/submit.
//!
//! # Responsibility
//! - Describe the selection context-menu entry the host registers.
//! - Stage a clicked selection as the draft quote.
//! - Prefill the popup from the draft, or from the live page selection.
//!
//! # Invariants
//! - Only the `plant-quote` entry with a non-blank selection stages a draft.
//! - Page-selection failures are logged and leave the field empty.

use crate::repo::draft_repo::DraftRepository;
use crate::repo::quote_repo::QuoteRepository;
use crate::repo::RepoResult;
use crate::store::PersistentStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const PLANT_QUOTE_MENU_ID: &str = "plant-quote";
pub const PLANT_QUOTE_MENU_TITLE: &str = "Plant this Quote";
pub const SELECTION_CONTEXT: &str = "selection";

/// Context-menu entry registered on install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuRegistration {
    pub id: &'static str,
    pub title: &'static str,
    pub contexts: &'static [&'static str],
}

pub fn plant_quote_menu() -> MenuRegistration {
    MenuRegistration {
        id: PLANT_QUOTE_MENU_ID,
        title: PLANT_QUOTE_MENU_TITLE,
        contexts: &[SELECTION_CONTEXT],
    }
}

/// What the host should do after a menu click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    Ignored,
    /// Draft staged; the host opens the popup.
    OpenPopup,
}

/// Handles one context-menu click.
pub fn handle_menu_click<S: PersistentStore + ?Sized>(
    store: &S,
    menu_item_id: &str,
    selection_text: Option<&str>,
) -> RepoResult<CaptureOutcome> {
    if menu_item_id != PLANT_QUOTE_MENU_ID {
        return Ok(CaptureOutcome::Ignored);
    }
    let Some(selection) = selection_text else {
        return Ok(CaptureOutcome::Ignored);
    };

    if DraftRepository::new(store).stage(selection)? {
        info!("event=capture_stage module=capture status=ok");
        Ok(CaptureOutcome::OpenPopup)
    } else {
        Ok(CaptureOutcome::Ignored)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// No active tab to read from.
    NoActiveTab,
    /// Script injection into the page failed.
    Injection(String),
}

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveTab => write!(f, "no active tab"),
            Self::Injection(message) => write!(f, "selection injection failed: {message}"),
        }
    }
}

impl Error for SelectionError {}

/// Host hook that reads the current page selection.
pub trait SelectionSource {
    fn read_selection(&mut self) -> Result<Option<String>, SelectionError>;
}

/// Text the popup opens with: the staged draft first, then the page selection.
pub fn popup_prefill<S, P>(store: &S, selection: &mut P) -> String
where
    S: PersistentStore + ?Sized,
    P: SelectionSource + ?Sized,
{
    if let Some(draft) = DraftRepository::new(store).take() {
        return draft;
    }

    match selection.read_selection() {
        Ok(text) => text.unwrap_or_default(),
        Err(err) => {
            warn!("event=selection_read module=capture status=error error={err}");
            String::new()
        }
    }
}

/// Saves the popup form as-is.
pub fn submit_popup<S: PersistentStore + ?Sized>(
    store: &S,
    text: &str,
    author: &str,
) -> RepoResult<usize> {
    QuoteRepository::new(store).append(text, author)
}
