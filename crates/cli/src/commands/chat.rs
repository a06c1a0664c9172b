//! `deskhand chat` — Interactive or single-message chat mode.

use deskhand_agent::{AgentLoop, HistoryWriter};
use deskhand_config::AppConfig;
use deskhand_core::message::{Conversation, Message};
use deskhand_memory::FileStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{self, AsyncBufReadExt, BufReader};

/// The fallback system directive when no override is configured.
fn default_system_prompt() -> String {
    concat!(
        "You are Deskhand, a helpful AI assistant running in the user's terminal. ",
        "You have tools to read files, list directories, search file contents, ",
        "match files by glob pattern, and remember facts across sessions. ",
        "Use them when they help answer the user's question. ",
        "Be concise and accurate.",
    )
    .into()
}

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early — give a clear error
    if config.api_key.is_none()
        && config.default_provider != "ollama"
        && !config.providers.contains_key(&config.default_provider)
    {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    DESKHAND_API_KEY=sk-...      (generic)");
        eprintln!("    OPENROUTER_API_KEY=sk-or-... (for OpenRouter)");
        eprintln!("    OPENAI_API_KEY=sk-...        (for OpenAI direct)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let provider = deskhand_providers::build_provider(&config)
        .map_err(|e| format!("Failed to build provider: {e}"))?;

    // The fact store is loaded once at startup and shared with the memory
    // tools; it is the sole writer of its backing file.
    let store = Arc::new(FileStore::new(config.memory_path()));
    let tools = Arc::new(deskhand_tools::default_registry(store));

    let system_prompt = config
        .identity
        .system_prompt_override
        .clone()
        .unwrap_or_else(default_system_prompt);

    let cancel = Arc::new(AtomicBool::new(false));

    let agent = AgentLoop::new(
        provider,
        &config.default_model,
        config.default_temperature,
        tools,
        system_prompt,
    )
    .with_max_tokens(config.default_max_tokens)
    .with_cancel_flag(cancel.clone());

    if let Some(msg) = message {
        // Single message mode
        let mut conv = Conversation::new();
        conv.push(Message::user(&msg));

        eprint!("  Thinking...");
        let response = agent.process(&mut conv).await?;
        eprint!("\r              \r");
        println!("{response}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  Deskhand — Interactive Mode");
    println!("  ---------------------------");
    println!("  Provider:  {}", config.default_provider);
    println!("  Model:     {}", config.default_model);
    println!("  Memory:    {}", config.memory_path().display());
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or press Ctrl+C to quit.");
    println!();

    // A Ctrl-C during a round sets the abort flag; the dispatch loop honors
    // it at the next round boundary, never mid-tool-execution.
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.store(true, Ordering::SeqCst);
            }
        });
    }

    let stdin = io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();
    let mut conv = Conversation::new();
    let history = HistoryWriter::new(config.history_dir());

    loop {
        if cancel.load(Ordering::SeqCst) {
            break;
        }

        print!("  You > ");
        use std::io::Write;
        std::io::stdout().flush()?;

        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            break; // EOF (Ctrl+D)
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" {
            break;
        }

        conv.push(Message::user(line));

        eprint!("  ...");
        match agent.process(&mut conv).await {
            Ok(response) => {
                eprint!("\r     \r");
                println!();
                for line in response.lines() {
                    println!("  Assistant > {line}");
                }
                println!();
            }
            Err(deskhand_core::Error::Cancelled) => {
                eprint!("\r     \r");
                break;
            }
            Err(e) => {
                // Backend failures end the round, not the session; the
                // transcript stays intact for the next input
                eprint!("\r     \r");
                eprintln!("  [Error] {e}");
                println!();
            }
        }
    }

    // Hand the transcript to the history export before exiting
    match history.export(&conv) {
        Ok(Some(path)) => {
            println!();
            println!("  Session saved to {}", path.display());
        }
        Ok(None) => {}
        Err(e) => eprintln!("  [Error] Failed to save session history: {e}"),
    }
    println!("  Goodbye!");

    Ok(())
}
