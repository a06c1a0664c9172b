//! Save-memory tool — append one fact to the durable store.

use async_trait::async_trait;
use deskhand_core::error::ToolError;
use deskhand_core::memory::FactStore;
use deskhand_core::tool::{Tool, ToolResult};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Deserialize)]
struct SaveMemoryArgs {
    fact: String,
}

pub struct SaveMemoryTool {
    store: Arc<dyn FactStore>,
}

impl SaveMemoryTool {
    pub fn new(store: Arc<dyn FactStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SaveMemoryTool {
    fn name(&self) -> &str {
        "save_memory"
    }

    fn description(&self) -> &str {
        "Remember a fact for later sessions. Use this when the user tells you \
         something worth keeping: preferences, names, project details."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "fact": {
                    "type": "string",
                    "description": "The fact to remember, as a short sentence"
                }
            },
            "required": ["fact"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: SaveMemoryArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        if args.fact.trim().is_empty() {
            return Err(ToolError::InvalidArguments("'fact' must not be empty".into()));
        }

        match self.store.save(&args.fact).await {
            Ok(saved) => Ok(ToolResult {
                call_id: String::new(),
                success: true,
                output: format!(
                    "Saved as {}. Memory now holds {} fact(s).",
                    saved.key, saved.total
                ),
            }),
            Err(e) => {
                warn!(error = %e, "Fact save failed");
                Ok(ToolResult {
                    call_id: String::new(),
                    success: false,
                    output: format!("Failed to save fact: {e}"),
                })
            }
        }
    }
}
