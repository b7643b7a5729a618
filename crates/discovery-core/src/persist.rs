//! Output file persistence
//!
//! Files are written to a temp file in the target directory and renamed
//! into place, so a reader never sees a half-written export.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{DiscoveryError, Result};

/// Ensure the output directory exists; create it if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| DiscoveryError::io(dir, e))?;
        if !meta.is_dir() {
            return Err(DiscoveryError::io(
                dir,
                std::io::Error::new(std::io::ErrorKind::Other, "path is not a directory"),
            ));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| DiscoveryError::io(dir, e))
}

/// Atomically write `content` to `{dir}/{filename}`, replacing any existing file.
pub fn write_atomic(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    ensure_output_dir(dir)?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| DiscoveryError::io(dir, e))?;
    let written = tmp.write_all(content.as_bytes()).and_then(|_| tmp.flush());
    if let Err(e) = written {
        return Err(DiscoveryError::io(tmp.path(), e));
    }

    tmp.persist(&target)
        .map_err(|e| DiscoveryError::io(&target, e.error))?;
    Ok(target)
}

/// Read a UTF-8 text input file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| DiscoveryError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("output");

        let path = write_atomic(&dir, "a.tsv", "x\ty").unwrap();
        assert_eq!(path, dir.join("a.tsv"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "x\ty");
    }

    #[test]
    fn test_write_atomic_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        write_atomic(dir.path(), "a.tsv", "old content that is longer").unwrap();
        let path = write_atomic(dir.path(), "a.tsv", "new").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new");

        // No temp files left behind
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_ensure_output_dir_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "").unwrap();

        let result = ensure_output_dir(&file);
        assert!(matches!(result, Err(DiscoveryError::Io { .. })));
    }

    #[test]
    fn test_read_text_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("series.txt");
        match read_text(&missing) {
            Err(DiscoveryError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
