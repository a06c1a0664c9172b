//! Fact store trait — durable key→fact storage with append/search semantics.
//!
//! The fact store lets the agent remember free-text facts across sessions.
//! Records are only ever appended or read; keys are generated from the save
//! timestamp and stay unique even for saves landing on the same clock tick.

use crate::error::MemoryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One persisted fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRecord {
    /// Generated key, `fact_<ISO-8601 UTC timestamp>`
    pub key: String,

    /// Free-text fact
    pub value: String,
}

/// The outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFact {
    /// The key the fact was stored under
    pub key: String,

    /// How many facts the store holds after the save
    pub total: usize,
}

/// The core FactStore trait.
///
/// Implementations: file-backed (JSON object on disk), in-memory (for tests).
/// The store is passed by reference to whichever components need it; it is
/// the sole owner of its backing representation.
#[async_trait]
pub trait FactStore: Send + Sync {
    /// The store kind (e.g., "file", "in_memory").
    fn name(&self) -> &str;

    /// Append a new fact under a freshly generated key and persist it
    /// durably. After this returns Ok, the fact has been written through to
    /// the backing store.
    async fn save(&self, fact: &str) -> std::result::Result<SavedFact, MemoryError>;

    /// Look up a fact by its exact key.
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, MemoryError>;

    /// All records whose value contains `query` as a case-sensitive
    /// substring, in insertion order.
    async fn search(&self, query: &str) -> std::result::Result<Vec<FactRecord>, MemoryError>;

    /// Every record, in insertion order.
    async fn list(&self) -> std::result::Result<Vec<FactRecord>, MemoryError>;

    /// Total record count.
    async fn count(&self) -> std::result::Result<usize, MemoryError>;
}
