//! Use-case services consumed by the extension surfaces.
//!
//! # Responsibility
//! - Compose repositories into the calls each surface makes.
//! - Hold per-surface session state instead of process globals.
//!
//! # Invariants
//! - Services stay storage-agnostic; they only see `PersistentStore`.

pub mod capture;
pub mod dashboard;
pub mod quote_service;
