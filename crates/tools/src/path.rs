//! Path argument validation shared by the filesystem tools.
//!
//! Every path argument must be absolute and point at an existing entry of the
//! expected kind. Violations become `ToolError::InvalidPath`, which the
//! dispatch loop renders as an in-band textual result for the model.

use deskhand_core::error::ToolError;
use std::path::{Path, PathBuf};

/// Validate that `path` is absolute and an existing regular file.
pub fn existing_file(path: &str) -> Result<PathBuf, ToolError> {
    let p = absolute(path)?;
    if !p.exists() {
        return Err(ToolError::InvalidPath(format!(
            "No such file: {}",
            p.display()
        )));
    }
    if !p.is_file() {
        return Err(ToolError::InvalidPath(format!(
            "Not a file: {} (expected a file, found a directory)",
            p.display()
        )));
    }
    Ok(p)
}

/// Validate that `path` is absolute and an existing directory.
pub fn existing_dir(path: &str) -> Result<PathBuf, ToolError> {
    let p = absolute(path)?;
    if !p.exists() {
        return Err(ToolError::InvalidPath(format!(
            "No such directory: {}",
            p.display()
        )));
    }
    if !p.is_dir() {
        return Err(ToolError::InvalidPath(format!(
            "Not a directory: {} (expected a directory, found a file)",
            p.display()
        )));
    }
    Ok(p)
}

fn absolute(path: &str) -> Result<PathBuf, ToolError> {
    let p = Path::new(path);
    if !p.is_absolute() {
        return Err(ToolError::InvalidPath(format!(
            "Path must be absolute: {path}"
        )));
    }
    Ok(p.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn relative_path_mentions_absolute() {
        let err = existing_file("notes.txt").unwrap_err();
        assert!(err.to_string().contains("absolute"));

        let err = existing_dir("some/dir").unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn missing_file_reported() {
        let err = existing_file("/tmp/deskhand_test_no_such_file_9271.txt").unwrap_err();
        assert!(matches!(err, ToolError::InvalidPath(_)));
        assert!(err.to_string().contains("No such file"));
    }

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = existing_file(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Not a file"));
    }

    #[test]
    fn file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("plain.txt");
        let mut f = std::fs::File::create(&file_path).unwrap();
        writeln!(f, "content").unwrap();

        let err = existing_dir(file_path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Not a directory"));
    }

    #[test]
    fn valid_paths_pass() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("ok.txt");
        std::fs::write(&file_path, "ok").unwrap();

        assert!(existing_file(file_path.to_str().unwrap()).is_ok());
        assert!(existing_dir(dir.path().to_str().unwrap()).is_ok());
    }
}
