//! Domain model for planted quotes and per-surface session state.
//!
//! # Invariants
//! - Quotes have structural identity; duplicates are allowed.
//! - Built-in quotes are compiled in and never change at runtime.
//! - Session state (theme, focus timer) is owned by one surface instance.

pub mod focus;
pub mod quote;
pub mod theme;
