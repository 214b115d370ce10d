//! Durable native store backed by the `kv_entries` table.
//!
//! Each surface opens its own `SqliteStore` on the shared file; SQLite
//! serializes individual statements, and one `set` batch commits as a unit.
//! Nothing spans more than one call. A stored value that is not valid JSON
//! is skipped by `get` without hiding the other requested keys.

use super::{PersistentStore, StoreMap, StoreResult};
use crate::db::migrations::apply_migrations;
use crate::db::{open_db, open_db_in_memory};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens the store file at `path`, creating and migrating it if needed.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an existing connection after bringing its schema up to date.
    pub fn from_connection(mut conn: Connection) -> StoreResult<Self> {
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }
}

impl PersistentStore for SqliteStore {
    fn get(&self, keys: &[&str]) -> StoreResult<StoreMap> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT value FROM kv_entries WHERE key = ?1;")?;
        let mut found = StoreMap::new();

        for key in keys {
            let raw: Option<String> = stmt.query_row([key], |row| row.get(0)).optional()?;
            let Some(raw) = raw else {
                continue;
            };
            match serde_json::from_str(&raw) {
                Ok(value) => {
                    found.insert((*key).to_string(), value);
                }
                Err(err) => {
                    warn!("event=store_decode module=store status=skipped backend=sqlite key={key} error={err}");
                }
            }
        }

        Ok(found)
    }

    fn set(&self, entries: StoreMap) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in &entries {
            let encoded = serde_json::to_string(value)?;
            tx.execute(
                "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![key, encoded],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}
