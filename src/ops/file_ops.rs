//! Plain file operations: read, write, delete.

use std::fs;
use std::path::Path;

use crate::error::{EditorError, Result};

pub fn read_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(EditorError::FileNotFound(path.display().to_string()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Write `content` to `path`, creating missing parent directories
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn delete_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(EditorError::FileNotFound(path.display().to_string()));
    }
    fs::remove_file(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_then_read_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/file.rs");

        write_file(&path, "fn main() {}").unwrap();
        assert_eq!(read_file(&path).unwrap(), "fn main() {}");
    }

    #[test]
    fn test_read_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = read_file(&temp.path().join("absent.rs")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_delete_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doomed.txt");
        write_file(&path, "x").unwrap();

        delete_file(&path).unwrap();
        assert!(!path.exists());
        assert!(delete_file(&path).is_err());
    }
}
