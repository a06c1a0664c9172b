//! File read tool — return a file's contents verbatim.

use async_trait::async_trait;
use deskhand_core::error::ToolError;
use deskhand_core::tool::{Tool, ToolResult};
use serde::Deserialize;

use crate::path;

#[derive(Deserialize)]
struct ReadFileArgs {
    absolute_path: String,
}

pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a file. The path must be absolute."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "absolute_path": {
                    "type": "string",
                    "description": "Absolute path of the file to read"
                }
            },
            "required": ["absolute_path"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: ReadFileArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let file = path::existing_file(&args.absolute_path)?;

        match tokio::fs::read_to_string(&file).await {
            Ok(content) => Ok(ToolResult {
                call_id: String::new(),
                success: true,
                output: content,
            }),
            Err(e) => Ok(ToolResult {
                call_id: String::new(),
                success: false,
                output: format!("Failed to read file: {e}"),
            }),
        }
    }
}
