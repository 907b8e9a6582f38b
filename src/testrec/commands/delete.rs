use crate::commands::CmdResult;
use crate::error::{Result, TestrecError};
use crate::store::{RecordStore, StorageBackend};

use super::helpers::{apply_batch, check_batch};

/// Soft-deletes each ID. Every ID is checked before the first one is touched.
pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, ids: &[u64]) -> Result<CmdResult> {
    check_batch(store, ids, |record| {
        if record.active {
            Ok(())
        } else {
            Err(TestrecError::AlreadyDeleted(record.id))
        }
    })?;

    apply_batch(store, ids, "Test record deleted", |store, id| {
        store.soft_delete(id)
    })
}
