//! File-backed fact store — one JSON object on disk.
//!
//! The backing representation maps each generated key to its fact string and
//! is rewritten in full on every save. Fact keys are chronological, so the
//! object's sorted-key order on reload equals insertion order.
//!
//! Storage location: `~/.deskhand/memory/facts.json`
//!
//! An absent file means an empty store; a malformed file is logged and
//! treated as empty. Neither ever crashes the process.

use async_trait::async_trait;
use deskhand_core::error::MemoryError;
use deskhand_core::memory::{FactRecord, FactStore, SavedFact};
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// A fact store persisted as a single JSON object file.
///
/// Records are loaded into memory on creation and the whole mapping is
/// flushed to disk on every save. This gives fast reads with durable writes.
pub struct FileStore {
    path: PathBuf,
    facts: RwLock<Vec<FactRecord>>,
}

impl FileStore {
    /// Create a new file-backed store at the given path.
    ///
    /// If the file exists, records are loaded from it (sorted-key order,
    /// which matches insertion order for generated keys). If it does not
    /// exist, the store starts empty and the file is created on first save.
    pub fn new(path: PathBuf) -> Self {
        let facts = Self::load_from_disk(&path);
        debug!(path = %path.display(), count = facts.len(), "Fact store loaded");
        Self {
            path,
            facts: RwLock::new(facts),
        }
    }

    /// Load records from the JSON object file.
    fn load_from_disk(path: &PathBuf) -> Vec<FactRecord> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(), // File doesn't exist yet — start empty
        };

        let map: serde_json::Map<String, serde_json::Value> =
            match serde_json::from_str(&content) {
                Ok(m) => m,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Malformed fact store file, starting empty");
                    return Vec::new();
                }
            };

        map.into_iter()
            .filter_map(|(key, value)| match value.as_str() {
                Some(fact) => Some(FactRecord {
                    key,
                    value: fact.to_string(),
                }),
                None => {
                    warn!(%key, "Skipping non-string fact value");
                    None
                }
            })
            .collect()
    }

    /// Rewrite the whole mapping to disk.
    fn persist(&self, facts: &[FactRecord]) -> Result<(), MemoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MemoryError::Storage(format!("Failed to create memory directory: {e}"))
            })?;
        }

        let map: serde_json::Map<String, serde_json::Value> = facts
            .iter()
            .map(|r| (r.key.clone(), serde_json::Value::String(r.value.clone())))
            .collect();

        let content = serde_json::to_string_pretty(&map)
            .map_err(|e| MemoryError::Storage(format!("Failed to serialize facts: {e}")))?;

        std::fs::write(&self.path, content)
            .map_err(|e| MemoryError::Storage(format!("Failed to write fact store: {e}")))
    }
}

#[async_trait]
impl FactStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn save(&self, fact: &str) -> Result<SavedFact, MemoryError> {
        // Key generation, insertion, and the full rewrite happen under one
        // write lock, so interleaved saves cannot lose updates.
        let mut facts = self.facts.write().await;
        let key = crate::generate_key(&facts);
        facts.push(FactRecord {
            key: key.clone(),
            value: fact.to_string(),
        });
        self.persist(&facts)?;
        debug!(%key, total = facts.len(), "Fact saved");
        Ok(SavedFact {
            key,
            total: facts.len(),
        })
    }

    async fn get(&self, key: &str) -> Result<Option<String>, MemoryError> {
        let facts = self.facts.read().await;
        Ok(facts.iter().find(|r| r.key == key).map(|r| r.value.clone()))
    }

    async fn search(&self, query: &str) -> Result<Vec<FactRecord>, MemoryError> {
        let facts = self.facts.read().await;
        Ok(facts
            .iter()
            .filter(|r| r.value.contains(query))
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<FactRecord>, MemoryError> {
        Ok(self.facts.read().await.clone())
    }

    async fn count(&self) -> Result<usize, MemoryError> {
        Ok(self.facts.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_path() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facts.json");
        (dir, path)
    }

    #[tokio::test]
    async fn save_and_get_roundtrip() {
        let (_dir, path) = temp_store_path();
        let store = FileStore::new(path);

        let saved = store.save("user likes blue").await.unwrap();
        assert!(saved.key.starts_with("fact_"));
        assert_eq!(saved.total, 1);

        let fact = store.get(&saved.key).await.unwrap();
        assert_eq!(fact.as_deref(), Some("user likes blue"));
    }

    #[tokio::test]
    async fn get_is_idempotent() {
        let (_dir, path) = temp_store_path();
        let store = FileStore::new(path);
        let saved = store.save("stable fact").await.unwrap();

        let first = store.get(&saved.key).await.unwrap();
        let second = store.get(&saved.key).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Some("stable fact"));
    }

    #[tokio::test]
    async fn save_survives_restart() {
        let (_dir, path) = temp_store_path();

        let saved = {
            let store = FileStore::new(path.clone());
            store.save("X").await.unwrap()
        };

        // Simulate a restart by reloading from the backing file
        let store = FileStore::new(path);
        let records = store.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, saved.key);
        assert_eq!(records[0].value, "X");
    }

    #[tokio::test]
    async fn persisted_form_is_a_json_object() {
        let (_dir, path) = temp_store_path();
        let store = FileStore::new(path.clone());
        let saved = store.save("the answer is 42").await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&content).unwrap();
        assert_eq!(
            map.get(&saved.key).and_then(|v| v.as_str()),
            Some("the answer is 42")
        );
    }

    #[tokio::test]
    async fn search_is_case_sensitive_substring() {
        let (_dir, path) = temp_store_path();
        let store = FileStore::new(path);
        store.save("User likes Rust").await.unwrap();
        store.save("user likes blue").await.unwrap();
        store.save("unrelated").await.unwrap();

        let hits = store.search("likes").await.unwrap();
        assert_eq!(hits.len(), 2);

        let hits = store.search("User").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value, "User likes Rust");
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let (_dir, path) = temp_store_path();
        let store = FileStore::new(path);
        store.save("first").await.unwrap();
        store.save("second").await.unwrap();
        store.save("third").await.unwrap();

        let records = store.list().await.unwrap();
        let values: Vec<&str> = records.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let (_dir, path) = temp_store_path();
        let store = FileStore::new(path);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn malformed_file_starts_empty() {
        let (_dir, path) = temp_store_path();
        std::fs::write(&path, "this is not json").unwrap();

        let store = FileStore::new(path);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn non_string_values_are_skipped() {
        let (_dir, path) = temp_store_path();
        std::fs::write(
            &path,
            r#"{"fact_2026-01-01T00:00:00.000000Z": "valid", "fact_2026-01-01T00:00:01.000000Z": 42}"#,
        )
        .unwrap();

        let store = FileStore::new(path);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn rapid_saves_never_collide() {
        let (_dir, path) = temp_store_path();
        let store = FileStore::new(path);

        for i in 0..20 {
            store.save(&format!("fact number {i}")).await.unwrap();
        }
        assert_eq!(store.count().await.unwrap(), 20);

        let records = store.list().await.unwrap();
        let mut keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        keys.dedup();
        assert_eq!(keys.len(), 20);
    }

    #[tokio::test]
    async fn unwritable_path_reports_storage_error() {
        let store = FileStore::new(PathBuf::from("/proc/deskhand-no-such-dir/facts.json"));
        let err = store.save("doomed").await.unwrap_err();
        assert!(matches!(err, MemoryError::Storage(_)));
    }
}
