//! Content search tool — regex search over the files under a directory.

use async_trait::async_trait;
use deskhand_core::error::ToolError;
use deskhand_core::tool::{Tool, ToolResult};
use regex::Regex;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::path;

/// Upper bound on reported matches so a broad pattern cannot flood the
/// transcript.
const MAX_MATCHES: usize = 200;

#[derive(Deserialize)]
struct SearchFileContentArgs {
    pattern: String,
    absolute_path: String,
    #[serde(default)]
    include: Option<String>,
}

pub struct SearchFileContentTool;

#[async_trait]
impl Tool for SearchFileContentTool {
    fn name(&self) -> &str {
        "search_file_content"
    }

    fn description(&self) -> &str {
        "Search file contents under a directory with a regular expression. \
         Returns 'path:line_number:line' for each match. Optionally filter \
         which files are searched with an 'include' glob on file names \
         (e.g. '*.rs')."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "Regular expression to search for"
                },
                "absolute_path": {
                    "type": "string",
                    "description": "Absolute path of the directory to search"
                },
                "include": {
                    "type": "string",
                    "description": "Optional glob filter on file names, e.g. '*.rs'"
                }
            },
            "required": ["pattern", "absolute_path"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: SearchFileContentArgs = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
        let pattern = args.pattern.as_str();

        let include = match &args.include {
            Some(g) => Some(glob::Pattern::new(g).map_err(|e| {
                ToolError::InvalidArguments(format!("Invalid 'include' glob: {e}"))
            })?),
            None => None,
        };

        let regex = Regex::new(pattern)
            .map_err(|e| ToolError::InvalidArguments(format!("Invalid regex pattern: {e}")))?;

        let dir = path::existing_dir(&args.absolute_path)?;

        let mut matches: Vec<String> = Vec::new();
        let mut truncated = false;

        'files: for entry in WalkDir::new(&dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if let Some(pattern) = &include {
                let name = entry.file_name().to_string_lossy();
                if !pattern.matches(&name) {
                    continue;
                }
            }

            // Binary and unreadable files are silently skipped
            let Ok(content) = std::fs::read_to_string(entry.path()) else {
                continue;
            };

            for (lineno, line) in content.lines().enumerate() {
                if regex.is_match(line) {
                    if matches.len() >= MAX_MATCHES {
                        truncated = true;
                        break 'files;
                    }
                    matches.push(format!("{}:{}:{}", entry.path().display(), lineno + 1, line));
                }
            }
        }

        let mut output = if matches.is_empty() {
            format!("No matches for '{pattern}' in {}.", dir.display())
        } else {
            matches.join("\n")
        };
        if truncated {
            output.push_str(&format!("\n(truncated at {MAX_MATCHES} matches)"));
        }

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output,
        })
    }
}
