//! Directory listing tool.

use async_trait::async_trait;
use deskhand_core::error::ToolError;
use deskhand_core::tool::{Tool, ToolResult};
use serde::Deserialize;

use crate::path;

#[derive(Deserialize)]
struct ListDirectoryArgs {
    absolute_path: String,
}

pub struct ListDirectoryTool;

#[async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &str {
        "list_directory"
    }

    fn description(&self) -> &str {
        "List the entries of a directory, one per line. Directories carry a \
         trailing '/'. The path must be absolute."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "absolute_path": {
                    "type": "string",
                    "description": "Absolute path of the directory to list"
                }
            },
            "required": ["absolute_path"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: ListDirectoryArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let dir = path::existing_dir(&args.absolute_path)?;

        let mut read_dir = match tokio::fs::read_dir(&dir).await {
            Ok(rd) => rd,
            Err(e) => {
                return Ok(ToolResult {
                    call_id: String::new(),
                    success: false,
                    output: format!("Failed to list directory: {e}"),
                });
            }
        };

        let mut entries: Vec<String> = Vec::new();
        while let Ok(Some(entry)) = read_dir.next_entry().await {
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.path().is_dir() {
                name.push('/');
            }
            entries.push(name);
        }
        entries.sort();

        let output = if entries.is_empty() {
            format!("{} is empty.", dir.display())
        } else {
            entries.join("\n")
        };

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_sorted_entries_with_dir_markers() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let result = ListDirectoryTool
            .execute(serde_json::json!({
                "absolute_path": dir.path().to_str().unwrap()
            }))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.output, "a.txt\nb.txt\nsub/");
    }

    #[tokio::test]
    async fn empty_directory_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = ListDirectoryTool
            .execute(serde_json::json!({
                "absolute_path": dir.path().to_str().unwrap()
            }))
            .await
            .unwrap();
        assert!(result.output.contains("is empty"));
    }

    #[tokio::test]
    async fn file_path_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("plain.txt");
        std::fs::write(&file_path, "x").unwrap();

        let err = ListDirectoryTool
            .execute(serde_json::json!({
                "absolute_path": file_path.to_str().unwrap()
            }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Not a directory"));
    }

    #[tokio::test]
    async fn relative_path_rejected() {
        let err = ListDirectoryTool
            .execute(serde_json::json!({"absolute_path": "some/dir"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }
}
