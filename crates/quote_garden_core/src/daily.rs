//! Deterministic quote-of-the-day selection.
//!
//! # Responsibility
//! - Render a calendar day as the key shared by the daily quote and journal.
//! - Map a day key to an index into the merged quote list.
//!
//! # Invariants
//! - Same day key and list length always yield the same index.
//! - The index is always in `[0, list_len)`.
//! - No I/O; callers pass the current merged-list length on every call.
//!
//! The hash reproduces the browser extension's string hash bit for bit: the
//! accumulator is a plain integer, and only the left-shift operand is coerced
//! to a 32-bit signed value. Installs keep the same quote on the same day.

use chrono::{Local, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DAY_KEY_FORMAT: &str = "%a %b %d %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyIndexError {
    /// No quotes to choose from. Unreachable while built-ins exist.
    EmptyQuoteList,
}

impl Display for DailyIndexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyQuoteList => write!(f, "cannot pick a daily quote from an empty list"),
        }
    }
}

impl Error for DailyIndexError {}

/// Renders `date` as a day key, e.g. `Mon Jan 01 2024`.
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// Day key for the local calendar day.
pub fn today_key() -> String {
    day_key(Local::now().date_naive())
}

/// Folds the UTF-16 code units of `day_key` into the selection hash.
pub fn day_key_hash(day_key: &str) -> i64 {
    day_key.encode_utf16().fold(0_i64, |hash, unit| {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        i64::from(unit).wrapping_add(shifted).wrapping_sub(hash)
    })
}

/// Index of the quote of the day within a list of `list_len` quotes.
pub fn daily_index(day_key: &str, list_len: usize) -> Result<usize, DailyIndexError> {
    if list_len == 0 {
        return Err(DailyIndexError::EmptyQuoteList);
    }
    let hash = day_key_hash(day_key).unsigned_abs();
    Ok((hash % list_len as u64) as usize)
}
