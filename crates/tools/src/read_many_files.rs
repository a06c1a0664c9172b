//! Multi-file read tool — concatenate several files into one result.
//!
//! Per-file failures are reported inline under that file's header and do not
//! abort the remaining reads.

use async_trait::async_trait;
use deskhand_core::error::ToolError;
use deskhand_core::tool::{Tool, ToolResult};
use serde::Deserialize;

use crate::path;

#[derive(Deserialize)]
struct ReadManyFilesArgs {
    paths: Vec<String>,
}

pub struct ReadManyFilesTool;

#[async_trait]
impl Tool for ReadManyFilesTool {
    fn name(&self) -> &str {
        "read_many_files"
    }

    fn description(&self) -> &str {
        "Read several files at once. Returns each file's contents under a \
         '--- <path> ---' header. All paths must be absolute."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "paths": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Absolute paths of the files to read"
                }
            },
            "required": ["paths"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: ReadManyFilesArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        if args.paths.is_empty() {
            return Err(ToolError::InvalidArguments(
                "'paths' must contain at least one path".into(),
            ));
        }

        let mut output = String::new();
        for raw in &args.paths {
            output.push_str(&format!("--- {raw} ---\n"));
            match path::existing_file(raw) {
                Ok(file) => match tokio::fs::read_to_string(&file).await {
                    Ok(content) => {
                        output.push_str(&content);
                        if !content.ends_with('\n') {
                            output.push('\n');
                        }
                    }
                    Err(e) => output.push_str(&format!("Error: failed to read file: {e}\n")),
                },
                Err(e) => output.push_str(&format!("Error: {e}\n")),
            }
        }

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output,
        })
    }
}
