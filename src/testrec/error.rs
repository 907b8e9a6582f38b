use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestrecError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Test record not found: {0}")]
    NotFound(u64),

    #[error("Test record {0} is already deleted")]
    AlreadyDeleted(u64),

    #[error("Test record {0} is not deleted")]
    NotDeleted(u64),

    #[error("Test record {0} must be deleted before it can be purged")]
    MustSoftDeleteFirst(u64),

    #[error("Unexpected header in {}: found {found:?}", path.display())]
    HeaderMismatch { path: PathBuf, found: String },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to save {}: {reason}", path.display())]
    Persist { path: PathBuf, reason: String },

    #[error("Store is full ({0} records)")]
    CapacityExceeded(usize),

    #[error("No test IDs left after {0}")]
    IdsExhausted(u64),

    #[error("Test record {0} is listed more than once")]
    DuplicateId(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl TestrecError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        TestrecError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TestrecError>;
