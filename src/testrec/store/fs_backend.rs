use super::backend::StorageBackend;
use crate::error::{Result, TestrecError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem backend. A single process is assumed to own each file; no
/// locking is done.
#[derive(Debug, Default, Clone)]
pub struct FsBackend;

impl FsBackend {
    pub fn new() -> Self {
        Self
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).map_err(TestrecError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TestrecError::Io(e)),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        self.ensure_dir(dir)?;

        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("records");

        // Atomic Write
        let tmp_path = dir.join(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));
        fs::write(&tmp_path, contents).map_err(TestrecError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(TestrecError::Io(e));
        }

        Ok(())
    }

    fn list_files(&self, dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let entries = fs::read_dir(dir).map_err(TestrecError::Io)?;

        for entry in entries {
            let entry = entry.map_err(TestrecError::Io)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let matches_ext = path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(ext));
            if matches_ext {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}
