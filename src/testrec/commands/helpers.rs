use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TestrecError};
use crate::model::Record;
use crate::store::{RecordStore, StorageBackend};
use std::collections::HashSet;

pub fn describe(record: &Record) -> String {
    format!(
        "#{} {} / {} ({})",
        record.id, record.system_name, record.test_type, record.result
    )
}

pub fn owned(records: Vec<&Record>) -> Vec<Record> {
    records.into_iter().cloned().collect()
}

/// Checks every ID in a batch before anything is changed: no repeats, and
/// `precondition` holds for each record.
pub fn check_batch<B, F>(store: &RecordStore<B>, ids: &[u64], precondition: F) -> Result<()>
where
    B: StorageBackend,
    F: Fn(&Record) -> Result<()>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(*id) {
            return Err(TestrecError::DuplicateId(*id));
        }
        precondition(store.get(*id)?)?;
    }
    Ok(())
}

/// Applies `op` to each ID in order, one save per ID.
///
/// The first failure is returned as an error when nothing has changed yet.
/// Once some IDs went through, the failure becomes an Error message and the
/// batch stops, so the caller still sees what was done.
pub fn apply_batch<B, F>(
    store: &mut RecordStore<B>,
    ids: &[u64],
    verb: &str,
    mut op: F,
) -> Result<CmdResult>
where
    B: StorageBackend,
    F: FnMut(&mut RecordStore<B>, u64) -> Result<Record>,
{
    let mut result = CmdResult::default();

    for (done, id) in ids.iter().enumerate() {
        match op(store, *id) {
            Ok(record) => {
                result.add_message(CmdMessage::success(format!("{}: {}", verb, describe(&record))));
                result.affected_records.push(record);
            }
            Err(e) if done == 0 => return Err(e),
            Err(e) => {
                result.add_message(CmdMessage::error(format!("#{}: {}", id, e)));
                let skipped = ids.len() - done - 1;
                if skipped > 0 {
                    result.add_message(CmdMessage::error(format!(
                        "{} remaining record(s) left unchanged",
                        skipped
                    )));
                }
                break;
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
pub mod fixtures {
    use crate::codec::HEADER;
    use crate::store::mem_backend::MemBackend;
    use crate::store::RecordStore;

    pub const FILE: &str = "/work/tests.csv";

    pub fn store() -> RecordStore<MemBackend> {
        RecordStore::open(MemBackend::new(), FILE, true).unwrap()
    }

    pub fn store_with(rows: &str) -> RecordStore<MemBackend> {
        let backend = MemBackend::new().with_file(FILE, format!("{HEADER}\n{rows}"));
        RecordStore::open(backend, FILE, false).unwrap()
    }

    pub fn on_disk(store: &RecordStore<MemBackend>) -> String {
        store.backend().contents(std::path::Path::new(FILE)).unwrap()
    }
}
