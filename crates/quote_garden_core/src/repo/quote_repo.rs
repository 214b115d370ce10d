//! Built-in plus user quote access over the persistent store.
//!
//! # Responsibility
//! - Merge the compiled-in quotes with the user set stored under `userQuotes`.
//! - Append newly planted quotes.
//!
//! # Invariants
//! - Merged list is `builtin ++ user`, built-ins first in their fixed order.
//! - Merged length is always `builtin.len() + user.len()`.
//! - Empty text/author is accepted; validation belongs to the capture form.
//!
//! # Concurrency
//! `append` is read-modify-write of the whole sequence. Two surfaces appending
//! at the same moment can lose one quote (last write wins).

use crate::model::quote::{builtin_quotes, Quote};
use crate::repo::{RepoError, RepoResult};
use crate::store::{PersistentStore, USER_QUOTES_KEY};
use log::{info, warn};
use serde_json::Value;

pub struct QuoteRepository<'s, S: PersistentStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: PersistentStore + ?Sized> QuoteRepository<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Built-in quotes followed by user quotes. Never fails.
    pub fn get_all(&self) -> Vec<Quote> {
        let mut quotes = builtin_quotes();
        quotes.extend(self.get_user_quotes());
        quotes
    }

    /// User quotes in insertion order; storage problems read as "none".
    pub fn get_user_quotes(&self) -> Vec<Quote> {
        match self.try_get_user_quotes() {
            Ok(quotes) => quotes,
            Err(err) => {
                warn!("event=quotes_read module=repo status=degraded error={err}");
                Vec::new()
            }
        }
    }

    /// User quotes, reporting storage and decoding failures.
    pub fn try_get_user_quotes(&self) -> RepoResult<Vec<Quote>> {
        match self.store.get_one(USER_QUOTES_KEY)? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => {
                serde_json::from_value(value).map_err(|err| RepoError::InvalidData {
                    key: USER_QUOTES_KEY.to_string(),
                    message: err.to_string(),
                })
            }
        }
    }

    /// Appends one quote and returns the new user-quote count.
    pub fn append(&self, text: &str, author: &str) -> RepoResult<usize> {
        let mut quotes = self.try_get_user_quotes()?;
        quotes.push(Quote::new(text, author));
        let count = quotes.len();

        self.store
            .set_one(USER_QUOTES_KEY, serde_json::to_value(&quotes)?)?;
        info!("event=quote_append module=repo status=ok user_quotes={count}");
        Ok(count)
    }
}
