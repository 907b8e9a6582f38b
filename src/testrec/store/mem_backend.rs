use super::backend::StorageBackend;
use crate::error::{Result, TestrecError};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since testrec is single-threaded,
/// which lets `StorageBackend` keep `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    files: RefCell<BTreeMap<PathBuf, String>>,
    simulate_write_error: RefCell<bool>,
    writes_before_error: RefCell<Option<usize>>,
    writes: RefCell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, bypassing write error simulation.
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(path.into(), contents.into());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Let `n` more writes succeed, then fail every write after them.
    pub fn fail_after_writes(&self, n: usize) {
        *self.writes_before_error.borrow_mut() = Some(n);
    }

    /// Current contents of a file, if any.
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.contents(path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let budget_spent = match self.writes_before_error.borrow_mut().as_mut() {
            Some(0) => true,
            Some(left) => {
                *left -= 1;
                false
            }
            None => false,
        };
        if *self.simulate_write_error.borrow() || budget_spent {
            return Err(TestrecError::Io(std::io::Error::other(
                "Simulated write error",
            )));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn list_files(&self, dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter(|p| {
                p.extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(ext))
            })
            .cloned()
            .collect())
    }
}
