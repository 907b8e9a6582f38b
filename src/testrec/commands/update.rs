use crate::commands::{CmdMessage, CmdResult, FieldEdit};
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};

use super::helpers::describe;

/// Applies all `edits` to one record and saves once. Any invalid edit aborts
/// the whole batch before anything is written.
pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    id: u64,
    edits: &[FieldEdit],
) -> Result<CmdResult> {
    let mut edit = store.begin_edit(id)?;
    for change in edits {
        edit.set(change.field, &change.value)?;
    }

    let mut result = CmdResult::default();
    if !edit.is_dirty() {
        result.add_message(CmdMessage::info(format!("Nothing to update for #{}.", id)));
        edit.discard();
        return Ok(result);
    }

    let changed: Vec<_> = edit
        .changed_fields()
        .iter()
        .map(|f| f.label())
        .collect();
    let record = store.commit(edit)?;
    result.add_message(CmdMessage::success(format!(
        "Test record updated ({}): {}",
        changed.join(", "),
        describe(&record)
    )));
    Ok(result.with_affected_records(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::fixtures;
    use crate::error::TestrecError;
    use crate::model::{Field, TestResult};

    #[test]
    fn updates_several_fields_at_once() {
        let mut store = fixtures::store_with("1,Core DB,UnitTest,Passed,1\n");
        let edits = [
            FieldEdit::new(Field::TestType, "Regression"),
            FieldEdit::new(Field::Result, "Failed"),
        ];
        let result = run(&mut store, 1, &edits).unwrap();
        let record = &result.affected_records[0];
        assert_eq!(record.test_type, "Regression");
        assert_eq!(record.result, TestResult::Failed);
        assert_eq!(store.get(1).unwrap(), record);
    }

    #[test]
    fn invalid_edit_leaves_record_untouched() {
        let mut store = fixtures::store_with("1,Core DB,UnitTest,Passed,1\n");
        let edits = [
            FieldEdit::new(Field::SystemName, "Renamed"),
            FieldEdit::new(Field::TestType, "x"),
        ];
        assert!(matches!(
            run(&mut store, 1, &edits),
            Err(TestrecError::Validation { .. })
        ));
        assert_eq!(store.get(1).unwrap().system_name, "Core DB");
    }

    #[test]
    fn same_values_are_a_no_op() {
        let mut store = fixtures::store_with("1,Core DB,UnitTest,Passed,1\n");
        let writes = store.backend().write_count();
        let result = run(&mut store, 1, &[FieldEdit::new(Field::Result, "passed")]).unwrap();
        assert!(result.affected_records.is_empty());
        assert_eq!(store.backend().write_count(), writes);
    }
}
