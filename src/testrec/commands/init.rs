use crate::commands::{load_messages, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};

/// Reports on a freshly bound store.
pub fn run<B: StorageBackend>(store: &RecordStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Using {} ({} records, {} deleted)",
        store.path().display(),
        store.len(),
        store.list_inactive().len()
    )));
    result.messages.extend(load_messages(store));
    Ok(result.with_files(vec![store.path().to_path_buf()]))
}
