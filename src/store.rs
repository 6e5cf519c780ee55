//! Content store - the file operations the renamer sequences
//!
//! The orchestrator only talks to this trait, so the create-before-delete
//! ordering can be tested without touching the file system.

use crate::error::{Error, Result};
use std::path::Path;

/// File operations needed to apply a rename
pub trait ContentStore {
    /// Read a file's text content. Callers treat unreadable entries
    /// (directories, binary data, vanished files) as empty.
    fn read_content(&self, path: &Path) -> Result<String>;

    /// Create a new file holding `content`. Fails if `path` already exists.
    fn create(&self, path: &Path, content: &str) -> Result<()>;

    /// Remove a file.
    fn delete(&self, path: &Path) -> Result<()>;
}

impl<S: ContentStore> ContentStore for &S {
    fn read_content(&self, path: &Path) -> Result<String> {
        (**self).read_content(path)
    }

    fn create(&self, path: &Path, content: &str) -> Result<()> {
        (**self).create(path, content)
    }

    fn delete(&self, path: &Path) -> Result<()> {
        (**self).delete(path)
    }
}

/// Content store backed by the local file system
pub struct FsStore;

impl ContentStore for FsStore {
    fn read_content(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|source| Error::ReadFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    fn create(&self, path: &Path, content: &str) -> Result<()> {
        use std::io::Write;

        // create_new refuses to clobber an existing destination
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|source| Error::CreateFailed {
                path: path.to_path_buf(),
                source,
            })?;

        file.write_all(content.as_bytes())
            .map_err(|source| Error::CreateFailed {
                path: path.to_path_buf(),
                source,
            })
    }

    fn delete(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path).map_err(|source| Error::DeleteFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");

        FsStore.create(&path, "hello").unwrap();
        assert_eq!(FsStore.read_content(&path).unwrap(), "hello");

        FsStore.delete(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_create_refuses_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");

        FsStore.create(&path, "original").unwrap();
        let err = FsStore.create(&path, "clobber").unwrap_err();

        assert!(matches!(err, Error::CreateFailed { .. }));
        assert_eq!(FsStore.read_content(&path).unwrap(), "original");
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsStore.read_content(&dir.path().join("gone.md")).unwrap_err();
        assert!(matches!(err, Error::ReadFailed { .. }));
    }
}
