//! Artifact removal
//!
//! Deleting a file record also deletes the payload it points at. The store
//! reaches the filesystem only through [`BlobDeleter`], so tests can swap
//! in a fake.

use std::fs;
use std::io;
use std::path::Path;

/// Removes on-disk artifacts referenced by file records
pub trait BlobDeleter: Send + Sync {
    /// Whether an artifact exists at `path`
    ///
    /// `Ok(false)` only when nothing is there; any other failure to inspect
    /// the path is an error.
    fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Remove the artifact at `path`
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// BlobDeleter backed by the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsBlobDeleter;

impl BlobDeleter for FsBlobDeleter {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        // A dangling symlink is still an artifact to remove
        match fs::symlink_metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}
