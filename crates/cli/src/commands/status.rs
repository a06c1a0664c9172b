//! `deskhand status` — Show configuration and store state.

use deskhand_config::AppConfig;
use deskhand_core::memory::FactStore;
use deskhand_memory::FileStore;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let store = FileStore::new(config.memory_path());
    let fact_count = store.count().await?;

    println!("Deskhand Status");
    println!("===============");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Provider:     {}", config.default_provider);
    println!("  Model:        {}", config.default_model);
    println!("  Temperature:  {}", config.default_temperature);
    println!(
        "  Memory:       {} ({} fact(s))",
        config.memory_path().display(),
        fact_count
    );
    println!("  History dir:  {}", config.history_dir().display());
    println!(
        "  API key:      {}",
        if config.api_key.is_some() {
            "configured"
        } else {
            "not set"
        }
    );

    // Reachability check against the configured backend
    match deskhand_providers::build_provider(&config) {
        Ok(provider) => match provider.health_check().await {
            Ok(true) => println!("  Backend:      reachable"),
            Ok(false) => println!("  Backend:      unreachable (endpoint returned an error)"),
            Err(e) => println!("  Backend:      unreachable ({e})"),
        },
        Err(e) => println!("  Backend:      not configured ({e})"),
    }

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  Config file found at {}", config_path.display());
    } else {
        println!("\n  No config file — using defaults and environment variables");
    }

    Ok(())
}
