//! `deskhand memory` — Inspect the fact store from the command line.

use deskhand_config::AppConfig;
use deskhand_core::memory::FactStore;
use deskhand_memory::FileStore;

pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = FileStore::new(config.memory_path());

    let records = store.list().await?;
    if records.is_empty() {
        println!("  No facts stored yet.");
        return Ok(());
    }

    println!("  {} fact(s):", records.len());
    for record in records {
        println!("  {}: {}", record.key, record.value);
    }

    Ok(())
}

pub async fn search(query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = FileStore::new(config.memory_path());

    let records = store.search(query).await?;
    if records.is_empty() {
        println!("  No facts matched \"{query}\".");
        return Ok(());
    }

    for record in records {
        println!("  {}: {}", record.key, record.value);
    }

    Ok(())
}
