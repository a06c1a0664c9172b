//! Built-in tool implementations for Deskhand.
//!
//! The fixed capability set the model may request:
//! read a file, read several files, list a directory, search file contents,
//! match files by glob pattern, and save/search/list remembered facts.
//!
//! Every tool converts its failures to text — either an `Err(ToolError)` the
//! dispatch loop renders in-band, or a failed `ToolResult` describing what
//! went wrong. Nothing panics across the tool boundary.

pub mod glob_files;
pub mod list_all_memory;
pub mod list_directory;
pub mod path;
pub mod read_file;
pub mod read_many_files;
pub mod save_memory;
pub mod search_file_content;
pub mod search_memory;

use deskhand_core::memory::FactStore;
use deskhand_core::tool::ToolRegistry;
use std::sync::Arc;

/// Create the default tool registry with all built-in tools.
///
/// The fact-memory tools share the given store; the filesystem tools take
/// absolute paths and carry no state of their own.
pub fn default_registry(store: Arc<dyn FactStore>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(read_file::ReadFileTool));
    registry.register(Box::new(read_many_files::ReadManyFilesTool));
    registry.register(Box::new(list_directory::ListDirectoryTool));
    registry.register(Box::new(search_file_content::SearchFileContentTool));
    registry.register(Box::new(glob_files::GlobTool));
    registry.register(Box::new(save_memory::SaveMemoryTool::new(store.clone())));
    registry.register(Box::new(search_memory::SearchMemoryTool::new(store.clone())));
    registry.register(Box::new(list_all_memory::ListAllMemoryTool::new(store)));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskhand_memory::InMemoryStore;

    #[test]
    fn default_registry_has_all_tools() {
        let registry = default_registry(Arc::new(InMemoryStore::new()));
        let mut names = registry.names();
        names.sort();
        assert_eq!(
            names,
            vec![
                "glob",
                "list_all_memory",
                "list_directory",
                "read_file",
                "read_many_files",
                "save_memory",
                "search_file_content",
                "search_memory",
            ]
        );
    }
}
