use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::StorageBackend;
use std::path::Path;

pub const DATA_FILE_EXT: &str = "csv";

/// Candidate data files in `dir`.
pub fn run<B: StorageBackend>(backend: &B, dir: &Path) -> Result<CmdResult> {
    let files = backend.list_files(dir, DATA_FILE_EXT)?;
    let mut result = CmdResult::default();
    if files.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No .{} files in {}",
            DATA_FILE_EXT,
            dir.display()
        )));
    }
    Ok(result.with_files(files))
}
