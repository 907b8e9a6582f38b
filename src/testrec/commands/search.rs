use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};

use super::helpers::owned;

pub fn run<B: StorageBackend>(store: &RecordStore<B>, term: &str) -> Result<CmdResult> {
    let matches = owned(store.search(term)?);
    let mut result = CmdResult::default();
    if matches.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No test records match {:?}.",
            term.trim()
        )));
    }
    Ok(result.with_listed_records(matches))
}
