//! Quote reads, planting, and the quote of the day.

use crate::daily::{daily_index, today_key, DailyIndexError};
use crate::model::quote::{builtin_quotes, Quote};
use crate::repo::quote_repo::QuoteRepository;
use crate::repo::RepoResult;
use crate::store::PersistentStore;

pub struct QuoteService<'s, S: PersistentStore + ?Sized> {
    quotes: QuoteRepository<'s, S>,
}

impl<'s, S: PersistentStore + ?Sized> QuoteService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            quotes: QuoteRepository::new(store),
        }
    }

    /// Merged list, built-ins first.
    pub fn all_quotes(&self) -> Vec<Quote> {
        self.quotes.get_all()
    }

    pub fn user_quotes(&self) -> Vec<Quote> {
        self.quotes.get_user_quotes()
    }

    /// Stores a new quote as typed; returns the user-quote count.
    pub fn plant_quote(&self, text: &str, author: &str) -> RepoResult<usize> {
        self.quotes.append(text, author)
    }

    /// Quote of the day for `day_key`, chosen from the current merged list.
    ///
    /// Planting quotes changes the list length, so the pick for a given day
    /// can move after an append.
    pub fn daily_quote_for(&self, day_key: &str) -> Result<Quote, DailyIndexError> {
        let mut quotes = self.quotes.get_all();
        let index = daily_index(day_key, quotes.len())?;
        Ok(quotes.swap_remove(index))
    }

    pub fn daily_quote(&self) -> Result<Quote, DailyIndexError> {
        self.daily_quote_for(&today_key())
    }

    /// Garden gallery contents; `None` keeps the empty-garden placeholder.
    pub fn garden_quotes(&self) -> Option<Vec<Quote>> {
        let user = self.quotes.get_user_quotes();
        if user.is_empty() {
            return None;
        }
        let mut quotes = builtin_quotes();
        quotes.extend(user);
        Some(quotes)
    }
}
