// file: src/utils.rs
// version: 1.0.0
// guid: b0171578-37c5-46fe-bf38-faa5cb8413a1

//! Small file helpers

use crate::error::{Result, ToolError};
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Write `content` to `path`, replacing any existing file
pub fn write_file(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, content).map_err(|e| ToolError::file(path, e))
}

pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| ToolError::file(path, e))
}

/// Decode a JSON document written by a tool
pub fn read_json(path: impl AsRef<Path>) -> Result<Value> {
    let content = read_file(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Append `.suffix` to the whole path (`tx` -> `tx.raw`), keeping any existing extension
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(".");
    raw.push(suffix);
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datum.json");

        write_file(&path, "{\"constructor\": 0}").unwrap();
        assert_eq!(read_file(&path).unwrap(), "{\"constructor\": 0}");
        assert_eq!(read_json(&path).unwrap()["constructor"], 0);
    }

    #[test]
    fn test_missing_file_carries_path() {
        let err = read_file("/no/such/dir/params.json").unwrap_err();
        assert!(err.to_string().contains("/no/such/dir/params.json"));
    }

    #[test]
    fn test_with_suffix() {
        assert_eq!(with_suffix(Path::new("out/tx"), "raw"), PathBuf::from("out/tx.raw"));
        assert_eq!(with_suffix(Path::new("tx.v1"), "sig"), PathBuf::from("tx.v1.sig"));
    }
}
