//! Key-value persistence for page-scoped filters.
//!
//! RULE: Only store.rs talks to the database.
//! The filter engine never calls a store. The session persists page
//! filters after a successful transition, and treats every failure here
//! as non-fatal: in-memory state stays authoritative.

use crate::{
    error::DeskResult,
    filter_state::FieldFilter,
    types::PageId,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::{BTreeMap, HashMap};

/// Single namespaced key holding every page's filters as one JSON blob.
pub const PAGE_FILTERS_KEY: &str = "riskdesk:page_filters";

pub type PageFilterMap = BTreeMap<PageId, Vec<FieldFilter>>;

/// Minimal key-value contract the page-filter persistence needs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> DeskResult<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> DeskResult<()>;
    fn remove(&mut self, key: &str) -> DeskResult<()>;
}

// ── SQLite ───────────────────────────────────────────────────────────────────

pub struct DeskStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl DeskStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &str) -> DeskResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files; ignore failures elsewhere.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn, path: Some(path.to_string()) })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> DeskResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn, path: None })
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> DeskResult<()> {
        self.conn
            .execute_batch(include_str!("../migrations/001_kv_store.sql"))?;
        Ok(())
    }
}

impl KeyValueStore for DeskStore {
    fn get(&self, key: &str) -> DeskResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, key: &str, value: &str) -> DeskResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                            updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().timestamp()],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DeskResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

// ── In-memory ────────────────────────────────────────────────────────────────

/// Store for runs without a database, and for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DeskResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> DeskResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DeskResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// ── Page filters ─────────────────────────────────────────────────────────────

/// Read persisted page filters. A missing, unreadable, or corrupt blob
/// degrades to no page filters.
pub fn load_page_filters(store: &dyn KeyValueStore) -> PageFilterMap {
    let raw = match store.get(PAGE_FILTERS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return PageFilterMap::new(),
        Err(e) => {
            log::warn!("page filters: store unavailable, starting empty: {e}");
            return PageFilterMap::new();
        }
    };
    match serde_json::from_str::<PageFilterMap>(&raw) {
        Ok(map) => map,
        Err(e) => {
            log::warn!("page filters: stored blob is corrupt, starting empty: {e}");
            PageFilterMap::new()
        }
    }
}

/// Write every page's filters as one blob under `PAGE_FILTERS_KEY`.
pub fn save_page_filters(store: &mut dyn KeyValueStore, filters: &PageFilterMap) -> DeskResult<()> {
    let json = serde_json::to_string(filters)?;
    store.put(PAGE_FILTERS_KEY, &json)?;
    log::debug!("page filters: saved {} page(s)", filters.len());
    Ok(())
}
