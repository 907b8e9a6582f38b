use crate::error::Result;
use std::path::{Path, PathBuf};

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while `RecordStore` handles the "what" (records, IDs, rollback).
pub trait StorageBackend {
    /// Read the whole file.
    /// Returns Ok(None) if the file does not exist.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, path: &Path) -> Result<Option<String>>;

    /// Replace the whole file.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// List files in `dir` whose extension is `ext` (without the dot), sorted by path.
    fn list_files(&self, dir: &Path, ext: &str) -> Result<Vec<PathBuf>>;
}
