//! Glob tool — match files by pattern, newest first.

use async_trait::async_trait;
use deskhand_core::error::ToolError;
use deskhand_core::tool::{Tool, ToolResult};
use serde::Deserialize;
use std::path::PathBuf;

use crate::path;

/// Upper bound on reported paths.
const MAX_FILES: usize = 100;

#[derive(Deserialize)]
struct GlobArgs {
    pattern: String,
    #[serde(default)]
    absolute_path: Option<String>,
}

pub struct GlobTool;

#[async_trait]
impl Tool for GlobTool {
    fn name(&self) -> &str {
        "glob"
    }

    fn description(&self) -> &str {
        "Find files matching a glob pattern (e.g. 'src/**/*.rs'), sorted by \
         modification time, newest first. 'absolute_path' selects the root \
         directory; it defaults to the current working directory."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "Glob pattern to match files against"
                },
                "absolute_path": {
                    "type": "string",
                    "description": "Absolute path of the directory to search from (optional)"
                }
            },
            "required": ["pattern"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: GlobArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
        let pattern = args.pattern.as_str();

        let root = match &args.absolute_path {
            Some(raw) => path::existing_dir(raw)?,
            None => std::env::current_dir().map_err(|e| {
                ToolError::ExecutionFailed {
                    tool_name: "glob".into(),
                    reason: format!("Cannot resolve working directory: {e}"),
                }
            })?,
        };

        let full_pattern = root.join(pattern).to_string_lossy().into_owned();

        let paths = glob::glob(&full_pattern)
            .map_err(|e| ToolError::InvalidArguments(format!("Invalid glob pattern: {e}")))?;

        let mut entries: Vec<(PathBuf, std::time::SystemTime)> = Vec::new();
        for p in paths.flatten() {
            if p.is_file() {
                let mtime = std::fs::metadata(&p)
                    .and_then(|m| m.modified())
                    .unwrap_or(std::time::SystemTime::UNIX_EPOCH);
                entries.push((p, mtime));
            }
        }

        // Newest first
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(MAX_FILES);

        let output = if entries.is_empty() {
            format!("No files matched '{pattern}' under {}.", root.display())
        } else {
            entries
                .iter()
                .map(|(p, _)| p.display().to_string())
                .collect::<Vec<_>>()
                .join("\n")
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
    async fn matches_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.rs"), "").unwrap();
        std::fs::write(dir.path().join("b.rs"), "").unwrap();
        std::fs::write(dir.path().join("c.txt"), "").unwrap();

        let result = GlobTool
            .execute(serde_json::json!({
                "pattern": "*.rs",
                "absolute_path": dir.path().to_str().unwrap()
            }))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.output.contains("a.rs"));
        assert!(result.output.contains("b.rs"));
        assert!(!result.output.contains("c.txt"));
    }

    #[tokio::test]
    async fn recursive_pattern_descends() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src/nested")).unwrap();
        std::fs::write(dir.path().join("src/nested/deep.rs"), "").unwrap();

        let result = GlobTool
            .execute(serde_json::json!({
                "pattern": "**/*.rs",
                "absolute_path": dir.path().to_str().unwrap()
            }))
            .await
            .unwrap();

        assert!(result.output.contains("deep.rs"));
    }

    #[tokio::test]
    async fn no_match_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = GlobTool
            .execute(serde_json::json!({
                "pattern": "*.xyz",
                "absolute_path": dir.path().to_str().unwrap()
            }))
            .await
            .unwrap();
        assert!(result.output.contains("No files matched"));
    }

    #[tokio::test]
    async fn relative_root_rejected() {
        let err = GlobTool
            .execute(serde_json::json!({
                "pattern": "*.rs",
                "absolute_path": "src"
            }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[tokio::test]
    async fn missing_pattern_rejected() {
        let result = GlobTool.execute(serde_json::json!({})).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
