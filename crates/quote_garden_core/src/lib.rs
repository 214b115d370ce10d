//! Core logic for Quote Garden.
//! Owns quote persistence, daily selection, capture staging and surface state.

pub mod config;
#[cfg(feature = "sqlite")]
pub mod db;
pub mod daily;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::CoreConfig;
pub use daily::{daily_index, day_key, today_key, DailyIndexError};
pub use logging::default_log_level;
#[cfg(feature = "file-logging")]
pub use logging::{init_logging, logging_status};
pub use model::focus::{FocusPhase, FocusSession, FocusTick};
pub use model::quote::{builtin_quotes, Quote, BUILTIN_QUOTES};
pub use model::theme::Theme;
pub use repo::{RepoError, RepoResult};
pub use service::capture::{CaptureOutcome, SelectionError, SelectionSource};
pub use service::dashboard::DashboardSession;
pub use service::quote_service::QuoteService;
#[cfg(feature = "sqlite")]
pub use store::{open_host_store, SqliteStore};
pub use store::{MemoryStore, PersistentStore, SelectedStore, StagedStore, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
