//! Repositories projecting store keys into domain values.
//!
//! # Responsibility
//! - Own the key layout and JSON shape of every persisted value.
//! - Keep store access behind small, use-case sized APIs.
//!
//! # Invariants
//! - Nothing is cached; every read goes back to the store.
//! - Read paths used for display degrade to defaults and log the cause.
//! - Write paths never overwrite a payload they could not decode.

use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod draft_repo;
pub mod journal_repo;
pub mod quote_repo;
pub mod theme_repo;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    /// Persisted value exists but does not have the expected shape.
    InvalidData { key: String, message: String },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData { key, message } => {
                write!(f, "invalid persisted value under `{key}`: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidData { .. } => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Store(StoreError::Encoding(value))
    }
}
