//! Fact store implementations for Deskhand.

pub mod file_store;
pub mod in_memory;

pub use file_store::FileStore;
pub use in_memory::InMemoryStore;

use chrono::{DateTime, Utc};
use deskhand_core::memory::FactRecord;

/// Generate a fresh fact key from the current wall clock.
///
/// Keys look like `fact_2026-08-06T10:15:30.123456Z`. Microsecond precision
/// keeps keys chronologically sortable; if two saves still land on the same
/// tick, a numeric suffix keeps the key unique instead of silently
/// overwriting the earlier fact.
pub(crate) fn generate_key(existing: &[FactRecord]) -> String {
    generate_key_at(Utc::now(), existing)
}

fn generate_key_at(now: DateTime<Utc>, existing: &[FactRecord]) -> String {
    let base = format!("fact_{}", now.format("%Y-%m-%dT%H:%M:%S%.6fZ"));
    if !existing.iter().any(|r| r.key == base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if !existing.iter().any(|r| r.key == candidate) {
            return candidate;
        }
        n += 1;
    }
}
