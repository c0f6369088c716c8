//! Persistent key-value store with soft-failure semantics.
//!
//! Records are JSON documents in a SQLite `kv` table under the data
//! directory. A capability probe runs once at open time: if the database
//! cannot be opened the store degrades to an in-memory map for the session
//! (logged as a warning, never fatal). Reads of corrupt payloads return the
//! caller-supplied default; failed writes return `false` and the caller
//! proceeds.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::StoreError;
use crate::streak::StreakRecord;
use crate::timer::TimerStats;

use super::data_dir;

/// Version string written under [`keys::APP_VERSION`], gating migrations.
pub const APP_VERSION: &str = "0.1.0";

/// Namespaced keys for the persisted domain records.
pub mod keys {
    pub const STREAK_DATA: &str = "streak_data";
    pub const TIMER_DATA: &str = "timer_data";
    pub const ANSWERED_QUESTIONS: &str = "answered_questions";
    pub const DISMISSED_MESSAGES: &str = "dismissed_messages";
    pub const APP_VERSION: &str = "app_version";
}

enum Backend {
    Sqlite(Connection),
    Memory(Mutex<HashMap<String, String>>),
}

/// Key-value store over SQLite, degrading to memory when unavailable.
pub struct Store {
    backend: Backend,
}

impl Store {
    /// Open the store at `~/.config/studystreak/studystreak.db`.
    ///
    /// Never fails: if the database cannot be opened the store serves the
    /// session from memory and every write is lost on drop.
    pub fn open() -> Self {
        let result = data_dir()
            .map_err(|e| e.to_string())
            .and_then(|dir| Self::open_at(dir.join("studystreak.db")).map_err(|e| e.to_string()));
        match result {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "persistent storage unavailable, using in-memory store");
                Self::open_memory()
            }
        }
    }

    /// Open the store at an explicit path, creating the schema if needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self {
            backend: Backend::Sqlite(conn),
        })
    }

    /// Open an in-memory store (degraded mode, also used by tests).
    pub fn open_memory() -> Self {
        Self {
            backend: Backend::Memory(Mutex::new(HashMap::new())),
        }
    }

    /// Whether writes survive the process.
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, Backend::Sqlite(_))
    }

    fn raw_get(&self, key: &str) -> Option<String> {
        match &self.backend {
            Backend::Sqlite(conn) => {
                let result = conn
                    .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                        row.get::<_, String>(0)
                    });
                match result {
                    Ok(v) => Some(v),
                    Err(rusqlite::Error::QueryReturnedNoRows) => None,
                    Err(e) => {
                        warn!(key, error = %e, "store read failed");
                        None
                    }
                }
            }
            Backend::Memory(map) => map.lock().ok()?.get(key).cloned(),
        }
    }

    fn raw_set(&self, key: &str, value: &str) -> bool {
        match &self.backend {
            Backend::Sqlite(conn) => {
                let result = conn.execute(
                    "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                    params![key, value],
                );
                match result {
                    Ok(_) => true,
                    Err(e) => {
                        warn!(key, error = %e, "store write failed");
                        false
                    }
                }
            }
            Backend::Memory(map) => match map.lock() {
                Ok(mut map) => {
                    map.insert(key.to_string(), value.to_string());
                    true
                }
                Err(_) => false,
            },
        }
    }

    /// Read a JSON record, substituting `default` on absence or corruption.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.raw_get(key) {
            Some(json) => match serde_json::from_str(&json) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key, error = %e, "discarding corrupt stored payload");
                    default
                }
            },
            None => default,
        }
    }

    /// Write a JSON record. Returns `false` (and logs) on failure.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(json) => self.raw_set(key, &json),
            Err(e) => {
                warn!(key, error = %e, "failed to serialize record");
                false
            }
        }
    }

    pub fn remove(&self, key: &str) {
        match &self.backend {
            Backend::Sqlite(conn) => {
                if let Err(e) = conn.execute("DELETE FROM kv WHERE key = ?1", params![key]) {
                    warn!(key, error = %e, "store delete failed");
                }
            }
            Backend::Memory(map) => {
                if let Ok(mut map) = map.lock() {
                    map.remove(key);
                }
            }
        }
    }

    /// Full reset: drop every stored record.
    pub fn clear_all(&self) {
        match &self.backend {
            Backend::Sqlite(conn) => {
                if let Err(e) = conn.execute("DELETE FROM kv", []) {
                    warn!(error = %e, "store clear failed");
                }
            }
            Backend::Memory(map) => {
                if let Ok(mut map) = map.lock() {
                    map.clear();
                }
            }
        }
    }

    // ── Typed domain accessors ───────────────────────────────────────

    pub fn streak_record(&self) -> StreakRecord {
        self.get(keys::STREAK_DATA, StreakRecord::default())
    }

    pub fn set_streak_record(&self, record: &StreakRecord) -> bool {
        self.set(keys::STREAK_DATA, record)
    }

    pub fn timer_stats(&self) -> TimerStats {
        self.get(keys::TIMER_DATA, TimerStats::default())
    }

    pub fn set_timer_stats(&self, stats: &TimerStats) -> bool {
        self.set(keys::TIMER_DATA, stats)
    }

    /// Question id -> ISO timestamp answered.
    pub fn answered_questions(&self) -> HashMap<String, String> {
        self.get(keys::ANSWERED_QUESTIONS, HashMap::new())
    }

    pub fn set_answered_questions(&self, answered: &HashMap<String, String>) -> bool {
        self.set(keys::ANSWERED_QUESTIONS, answered)
    }

    pub fn dismissed_messages(&self) -> BTreeSet<String> {
        self.get(keys::DISMISSED_MESSAGES, BTreeSet::new())
    }

    pub fn set_dismissed_messages(&self, dismissed: &BTreeSet<String>) -> bool {
        self.set(keys::DISMISSED_MESSAGES, dismissed)
    }

    pub fn app_version(&self) -> Option<String> {
        self.get(keys::APP_VERSION, None)
    }

    /// Run per-version migration hooks and bump the stored version.
    ///
    /// No data-shape changes exist yet, so the hook only records the
    /// version it is migrating from before writing the current one.
    pub fn migrate(&self, current: &str) {
        let stored = self.app_version();
        if stored.as_deref() == Some(current) {
            return;
        }
        if let Some(from) = &stored {
            warn!(from, to = current, "migrating stored records");
        }
        self.set(keys::APP_VERSION, &current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_default_when_absent() {
        let store = Store::open_memory();
        assert_eq!(store.get("missing", 42u32), 42);
    }

    #[test]
    fn set_then_get_roundtrip() {
        let store = Store::open_memory();
        assert!(store.set("n", &7u32));
        assert_eq!(store.get("n", 0u32), 7);
    }

    #[test]
    fn corrupt_payload_reads_as_default() {
        let store = Store::open_memory();
        assert!(store.raw_set(keys::STREAK_DATA, "{not json"));
        assert_eq!(store.streak_record(), StreakRecord::default());
    }

    #[test]
    fn remove_and_clear() {
        let store = Store::open_memory();
        store.set("a", &1u32);
        store.set("b", &2u32);
        store.remove("a");
        assert_eq!(store.get("a", 0u32), 0);
        store.clear_all();
        assert_eq!(store.get("b", 0u32), 0);
    }

    #[test]
    fn migrate_bumps_stored_version() {
        let store = Store::open_memory();
        assert_eq!(store.app_version(), None);
        store.migrate(APP_VERSION);
        assert_eq!(store.app_version().as_deref(), Some(APP_VERSION));
        // Idempotent on repeat.
        store.migrate(APP_VERSION);
        assert_eq!(store.app_version().as_deref(), Some(APP_VERSION));
    }

    #[test]
    fn memory_store_is_not_persistent() {
        assert!(!Store::open_memory().is_persistent());
    }
}
