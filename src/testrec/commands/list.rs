use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};

use super::helpers::owned;

pub fn run<B: StorageBackend>(store: &RecordStore<B>, show_deleted: bool) -> Result<CmdResult> {
    let listed = if show_deleted {
        store.list_inactive()
    } else {
        store.list_active()
    };
    Ok(CmdResult::default().with_listed_records(owned(listed)))
}
