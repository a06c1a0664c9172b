//! List-memory tool — dump every remembered fact.

use async_trait::async_trait;
use deskhand_core::error::ToolError;
use deskhand_core::memory::FactStore;
use deskhand_core::tool::{Tool, ToolResult};
use std::sync::Arc;

pub struct ListAllMemoryTool {
    store: Arc<dyn FactStore>,
}

impl ListAllMemoryTool {
    pub fn new(store: Arc<dyn FactStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ListAllMemoryTool {
    fn name(&self) -> &str {
        "list_all_memory"
    }

    fn description(&self) -> &str {
        "List every remembered fact with its key, oldest first."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        match self.store.list().await {
            Ok(records) => {
                let output = if records.is_empty() {
                    "Memory is empty.".to_string()
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
                output: format!("Memory listing failed: {e}"),
            }),
        }
    }
}
