//! Key/value persistence shared by every extension surface.
//!
//! # Responsibility
//! - Define the `PersistentStore` capability (`get`/`set`/`remove`).
//! - Name the storage keys the rest of core reads and writes.
//! - Provide the session-scoped fallback and the native durable backend.
//! - Stage calls against a snapshot for hosts with promise-based storage.
//!
//! # Invariants
//! - `get` omits missing keys instead of returning nulls.
//! - No cross-call transactions: surfaces only share what the store serializes.

use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[cfg(feature = "sqlite")]
use crate::db::DbError;

mod memory;
mod select;
mod staged;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use select::open_host_store;
pub use select::SelectedStore;
pub use staged::{StagedChanges, StagedStore};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Ordered sequence of user-planted quotes.
pub const USER_QUOTES_KEY: &str = "userQuotes";
/// Active theme identifier.
pub const USER_THEME_KEY: &str = "userTheme";
/// Selection staged by the context menu for the next popup.
pub const DRAFT_QUOTE_KEY: &str = "draftQuote";
/// Prefix of per-day journal keys, followed by the day string.
pub const JOURNAL_KEY_PREFIX: &str = "journal_";

pub type StoreMap = BTreeMap<String, Value>;
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// Backend cannot be reached at all.
    Unavailable(String),
    /// Backend was reachable but refused one operation.
    Rejected { op: &'static str, message: String },
    /// Value could not be encoded or decoded as JSON.
    Encoding(serde_json::Error),
    #[cfg(feature = "sqlite")]
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
            Self::Rejected { op, message } => write!(f, "store rejected `{op}`: {message}"),
            Self::Encoding(err) => write!(f, "store value encoding failed: {err}"),
            #[cfg(feature = "sqlite")]
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encoding(err) => Some(err),
            #[cfg(feature = "sqlite")]
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encoding(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage capability backing all repositories.
///
/// Implementations are chosen once per surface at startup (see
/// [`SelectedStore`]) and then used through this trait only.
pub trait PersistentStore {
    /// Reads the requested keys. Keys without a value are absent from the map.
    fn get(&self, keys: &[&str]) -> StoreResult<StoreMap>;
    /// Writes every entry, replacing existing values.
    fn set(&self, entries: StoreMap) -> StoreResult<()>;
    /// Deletes one key. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Reads a single key.
    fn get_one(&self, key: &str) -> StoreResult<Option<Value>> {
        let mut found = self.get(&[key])?;
        Ok(found.remove(key))
    }

    /// Writes a single key.
    fn set_one(&self, key: &str, value: Value) -> StoreResult<()> {
        self.set(StoreMap::from([(key.to_string(), value)]))
    }
}

impl<S: PersistentStore + ?Sized> PersistentStore for Box<S> {
    fn get(&self, keys: &[&str]) -> StoreResult<StoreMap> {
        (**self).get(keys)
    }

    fn set(&self, entries: StoreMap) -> StoreResult<()> {
        (**self).set(entries)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
