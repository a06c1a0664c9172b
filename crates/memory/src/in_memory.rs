//! In-memory fact store — same contract as the file store, no persistence.
//!
//! Used by tests and anywhere a throwaway store is useful.

use async_trait::async_trait;
use deskhand_core::error::MemoryError;
use deskhand_core::memory::{FactRecord, FactStore, SavedFact};
use tokio::sync::RwLock;

/// A purely in-memory fact store.
pub struct InMemoryStore {
    facts: RwLock<Vec<FactRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            facts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FactStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn save(&self, fact: &str) -> Result<SavedFact, MemoryError> {
        let mut facts = self.facts.write().await;
        let key = crate::generate_key(&facts);
        facts.push(FactRecord {
            key: key.clone(),
            value: fact.to_string(),
        });
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

    #[tokio::test]
    async fn save_and_get() {
        let store = InMemoryStore::new();
        let saved = store.save("ephemeral fact").await.unwrap();
        assert_eq!(saved.total, 1);
        assert_eq!(
            store.get(&saved.key).await.unwrap().as_deref(),
            Some("ephemeral fact")
        );
    }

    #[tokio::test]
    async fn get_unknown_key_is_none() {
        let store = InMemoryStore::new();
        assert!(store.get("fact_nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_in_insertion_order() {
        let store = InMemoryStore::new();
        store.save("alpha one").await.unwrap();
        store.save("beta").await.unwrap();
        store.save("alpha two").await.unwrap();

        let hits = store.search("alpha").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].value, "alpha one");
        assert_eq!(hits[1].value, "alpha two");
    }
}
