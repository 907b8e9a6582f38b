use crate::commands::CmdResult;
use crate::error::{Result, TestrecError};
use crate::store::{RecordStore, StorageBackend};

use super::helpers::{apply_batch, check_batch};

pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, ids: &[u64]) -> Result<CmdResult> {
    check_batch(store, ids, |record| {
        if record.active {
            Err(TestrecError::NotDeleted(record.id))
        } else {
            Ok(())
        }
    })?;

    apply_batch(store, ids, "Test record recovered", |store, id| {
        store.recover(id)
    })
}
