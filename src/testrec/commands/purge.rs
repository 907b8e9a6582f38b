use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TestrecError};
use crate::store::{RecordStore, StorageBackend};

use super::helpers::{apply_batch, check_batch};

/// Permanently removes soft-deleted records.
///
/// With no IDs, every deleted record is purged. Confirmation is the caller's
/// job; this runs unconditionally.
pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, ids: &[u64]) -> Result<CmdResult> {
    let targets: Vec<u64> = if ids.is_empty() {
        store.list_inactive().iter().map(|r| r.id).collect()
    } else {
        ids.to_vec()
    };

    if targets.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No test records to purge."));
        return Ok(res);
    }

    check_batch(store, &targets, |record| {
        if record.active {
            Err(TestrecError::MustSoftDeleteFirst(record.id))
        } else {
            Ok(())
        }
    })?;

    apply_batch(store, &targets, "Purged", |store, id| {
        store.permanent_delete(id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::fixtures;

    #[test]
    fn purges_all_deleted_when_no_ids() {
        let mut store = fixtures::store_with(
            "1,A sys,Unit,Passed,0\n2,B sys,Unit,Passed,1\n3,C sys,Unit,Passed,0\n",
        );
        let result = run(&mut store, &[]).unwrap();
        assert_eq!(result.affected_records.len(), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].id, 2);
    }

    #[test]
    fn refuses_active_record() {
        let mut store = fixtures::store_with("2,B sys,Unit,Passed,1\n");
        assert!(matches!(
            run(&mut store, &[2]),
            Err(TestrecError::MustSoftDeleteFirst(2))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn mixed_batch_purges_nothing() {
        let mut store = fixtures::store_with("1,A sys,Unit,Passed,0\n2,B sys,Unit,Passed,1\n");
        assert!(matches!(
            run(&mut store, &[1, 2]),
            Err(TestrecError::MustSoftDeleteFirst(2))
        ));
        assert!(matches!(
            run(&mut store, &[1, 1]),
            Err(TestrecError::DuplicateId(1))
        ));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn nothing_to_purge_is_info() {
        let mut store = fixtures::store();
        let result = run(&mut store, &[]).unwrap();
        assert!(result.affected_records.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
