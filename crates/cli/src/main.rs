//! Deskhand CLI — the main entry point.
//!
//! Commands:
//! - `chat`    — Interactive session or single-message mode
//! - `memory`  — Inspect the fact store
//! - `status`  — Show configuration and store state

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "deskhand",
    about = "Deskhand — a tool-augmented conversational agent",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the agent
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Inspect remembered facts
    Memory {
        #[command(subcommand)]
        action: MemoryAction,
    },

    /// Show configuration and store state
    Status,
}

#[derive(Subcommand)]
enum MemoryAction {
    /// List every remembered fact
    List,

    /// Search facts for a substring
    Search {
        /// Substring to look for
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Memory { action } => match action {
            MemoryAction::List => commands::memory::list().await?,
            MemoryAction::Search { query } => commands::memory::search(&query).await?,
        },
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
