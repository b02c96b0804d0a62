//! Key-value persistence for the assignment collection.
//!
//! Assignments are stored under a single fixed key in a SQLite-backed
//! key-value table, serialized as one JSON array with RFC 3339 timestamp
//! strings. The store reads the whole collection on open and writes the
//! whole collection after every mutation.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::types::Assignment;

/// Fixed key the assignment collection is stored under
pub const STORAGE_KEY: &str = "homework-assignments";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
";

/// Errors surfaced at the persistence boundary
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("backing store error: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("failed to encode assignment collection: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("malformed persisted data under key {key:?}: {source}")]
    Malformed {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Handle to the local backing store
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open (or create) the backing store at the given path
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open store at {}", db_path.display()))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Open a throwaway in-memory store
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory store")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Persist the full collection under the fixed key.
    ///
    /// An empty collection is not written: previously persisted non-empty
    /// state is left untouched, so deleting the last assignment only takes
    /// effect in memory for the rest of the session. See DESIGN.md for the
    /// policy decision.
    pub fn save(&self, assignments: &[Assignment]) -> Result<(), StorageError> {
        if assignments.is_empty() {
            debug!(key = STORAGE_KEY, "Skipping save of empty collection");
            return Ok(());
        }

        let json = serde_json::to_string(assignments).map_err(StorageError::Encode)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?1, ?2)",
            params![STORAGE_KEY, json],
        )?;
        debug!(key = STORAGE_KEY, count = assignments.len(), "Saved collection");
        Ok(())
    }

    /// Load the collection from the fixed key.
    ///
    /// An absent key yields an empty collection. A present but unparseable
    /// payload yields [`StorageError::Malformed`]; deciding whether that is
    /// fatal is left to the caller.
    pub fn load(&self) -> Result<Vec<Assignment>, StorageError> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                [STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            None => Ok(Vec::new()),
            Some(json) => serde_json::from_str(&json).map_err(|source| StorageError::Malformed {
                key: STORAGE_KEY,
                source,
            }),
        }
    }

    /// Write a raw payload under the fixed key, bypassing serialization
    #[cfg(test)]
    pub fn put_raw(&self, value: &str) {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?1, ?2)",
                params![STORAGE_KEY, value],
            )
            .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssignmentDraft;
    use chrono::{DateTime, Utc};
    use tempfile::TempDir;

    fn make_assignment(name: &str, deadline: &str) -> Assignment {
        Assignment::from_draft(AssignmentDraft {
            name: name.to_string(),
            subject: "English".to_string(),
            deadline: DateTime::parse_from_rfc3339(deadline)
                .unwrap()
                .with_timezone(&Utc),
        })
    }

    fn setup_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(&temp_dir.path().join("assignments.db")).unwrap();
        (temp_dir, storage)
    }

    // ========== open tests ==========

    #[test]
    fn test_open_creates_schema() {
        let (_temp_dir, storage) = setup_storage();
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_open_twice_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("assignments.db");

        let storage1 = Storage::open(&db_path).unwrap();
        storage1
            .save(&[make_assignment("Essay", "2025-01-10T00:00:00Z")])
            .unwrap();
        drop(storage1);

        let storage2 = Storage::open(&db_path).unwrap();
        assert_eq!(storage2.load().unwrap().len(), 1);
    }

    // ========== save/load tests ==========

    #[test]
    fn test_roundtrip_preserves_timestamps() {
        let (_temp_dir, storage) = setup_storage();
        let assignments = vec![
            make_assignment("Essay", "2025-01-10T15:30:45Z"),
            make_assignment("Problem set", "2025-01-12T08:00:00Z"),
        ];

        storage.save(&assignments).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded.len(), 2);
        for (saved, loaded) in assignments.iter().zip(loaded.iter()) {
            assert_eq!(loaded.id, saved.id);
            assert_eq!(loaded.deadline, saved.deadline);
            assert_eq!(loaded.created_at, saved.created_at);
        }
    }

    #[test]
    fn test_load_absent_key_is_empty() {
        let (_temp_dir, storage) = setup_storage();
        let loaded = storage.load().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_empty_array_payload() {
        let (_temp_dir, storage) = setup_storage();
        storage.put_raw("[]");

        let loaded = storage.load().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_malformed_payload_is_an_error() {
        let (_temp_dir, storage) = setup_storage();
        storage.put_raw("not valid json");

        let result = storage.load();
        assert!(matches!(result, Err(StorageError::Malformed { .. })));
    }

    #[test]
    fn test_load_wrong_shape_is_an_error() {
        let (_temp_dir, storage) = setup_storage();
        storage.put_raw(r#"{"id": "abc"}"#);

        let result = storage.load();
        assert!(matches!(result, Err(StorageError::Malformed { .. })));
    }

    #[test]
    fn test_save_overwrites_previous_collection() {
        let (_temp_dir, storage) = setup_storage();
        storage
            .save(&[
                make_assignment("Essay", "2025-01-10T00:00:00Z"),
                make_assignment("Problem set", "2025-01-12T00:00:00Z"),
            ])
            .unwrap();

        let smaller = vec![make_assignment("Reading", "2025-01-15T00:00:00Z")];
        storage.save(&smaller).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Reading");
    }

    // ========== empty-save policy tests ==========

    #[test]
    fn test_empty_save_does_not_clobber_persisted_state() {
        let (_temp_dir, storage) = setup_storage();
        let assignments = vec![make_assignment("Essay", "2025-01-10T00:00:00Z")];
        storage.save(&assignments).unwrap();

        storage.save(&[]).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Essay");
    }

    #[test]
    fn test_empty_save_on_fresh_store_writes_nothing() {
        let (_temp_dir, storage) = setup_storage();
        storage.save(&[]).unwrap();

        assert!(storage.load().unwrap().is_empty());
    }
}
