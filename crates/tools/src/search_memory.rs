//! Search-memory tool — substring search over remembered facts.

use async_trait::async_trait;
use deskhand_core::error::ToolError;
use deskhand_core::memory::FactStore;
use deskhand_core::tool::{Tool, ToolResult};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
struct SearchMemoryArgs {
    query: String,
}

pub struct SearchMemoryTool {
    store: Arc<dyn FactStore>,
}

impl SearchMemoryTool {
    pub fn new(store: Arc<dyn FactStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SearchMemoryTool {
    fn name(&self) -> &str {
        "search_memory"
    }

    fn description(&self) -> &str {
        "Search remembered facts for a case-sensitive substring. Returns \
         matching facts with their keys, oldest first."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Substring to look for in stored facts"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: SearchMemoryArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
        let query = args.query.as_str();

        match self.store.search(query).await {
            Ok(records) => {
                let output = if records.is_empty() {
                    format!("No facts matched '{query}'.")
                } else {
                    records
                        .iter()
                        .map(|r| format!("{}: {}", r.key, r.value))
                        .collect::<Vec<_>>()
                        .join("\n")
                };
                Ok(ToolResult {
                    call_id: String::new(),
                    success: true,
                    output,
                })
            }
            Err(e) => Ok(ToolResult {
                call_id: String::new(),
                success: false,
                output: format!("Memory search failed: {e}"),
            }),
        }
    }
}
