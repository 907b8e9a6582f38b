use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};
use crate::validate::check_result;

use super::helpers::describe;

pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    system_name: &str,
    test_type: &str,
    result: &str,
) -> Result<CmdResult> {
    let result = check_result(result)?;
    let record = store.create(system_name, test_type, result)?;

    let mut res = CmdResult::default();
    res.add_message(CmdMessage::success(format!(
        "Test record created: {}",
        describe(&record)
    )));
    Ok(res.with_affected_records(vec![record]))
}
