use super::backend::StorageBackend;
use crate::codec::{self, DecodeWarning};
use crate::error::{Result, TestrecError};
use crate::model::{Field, Record, TestResult};
use crate::validate::{check_name, check_result, check_type, MIN_FIELD_LEN};
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_RECORDS: usize = 10_000;

/// The record table bound to one file.
///
/// Every mutating operation rewrites the whole file before returning. If the
/// write fails the in-memory change is undone and `TestrecError::Persist` is
/// returned, so the table always matches what was last written.
pub struct RecordStore<B: StorageBackend> {
    backend: B,
    path: PathBuf,
    records: Vec<Record>,
    next_id: u64,
    max_records: usize,
    warnings: Vec<DecodeWarning>,
}

struct Loaded {
    records: Vec<Record>,
    next_id: u64,
    warnings: Vec<DecodeWarning>,
}

impl<B: StorageBackend> RecordStore<B> {
    /// Binds to `path`, loading it if it exists.
    ///
    /// A missing file is created with just the header when `create_if_missing`
    /// is set, otherwise `FileNotFound` is returned.
    pub fn open(backend: B, path: impl Into<PathBuf>, create_if_missing: bool) -> Result<Self> {
        let path = path.into();
        let loaded = load(&backend, &path, create_if_missing)?;
        Ok(Self {
            backend,
            path,
            records: loaded.records,
            next_id: loaded.next_id,
            max_records: DEFAULT_MAX_RECORDS,
            warnings: loaded.warnings,
        })
    }

    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    /// Switches to another file. On failure the current binding is untouched.
    pub fn rebind(&mut self, path: impl Into<PathBuf>, create_if_missing: bool) -> Result<()> {
        let path = path.into();
        let loaded = load(&self.backend, &path, create_if_missing)?;
        self.path = path;
        self.records = loaded.records;
        self.next_id = loaded.next_id;
        self.warnings = loaded.warnings;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, active and deleted, in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Problems found in the file at the last load.
    pub fn load_warnings(&self) -> &[DecodeWarning] {
        &self.warnings
    }

    pub fn create(
        &mut self,
        system_name: &str,
        test_type: &str,
        result: TestResult,
    ) -> Result<Record> {
        let system_name = check_name(system_name)?;
        let test_type = check_type(test_type)?;

        if self.records.len() >= self.max_records {
            return Err(TestrecError::CapacityExceeded(self.max_records));
        }

        let previous_next_id = self.next_id;
        let following = self
            .next_id
            .checked_add(1)
            .ok_or(TestrecError::IdsExhausted(self.next_id))?;
        let record = Record::new(self.next_id, system_name, test_type, result);
        self.records.push(record.clone());
        self.next_id = following;

        self.persist_or(|store| {
            store.records.pop();
            store.next_id = previous_next_id;
        })?;

        tracing::info!(id = record.id, "created test record");
        Ok(record)
    }

    /// Position of `id` in the table.
    pub fn find(&self, id: u64) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or(TestrecError::NotFound(id))
    }

    pub fn get(&self, id: u64) -> Result<&Record> {
        self.find(id).map(|idx| &self.records[idx])
    }

    pub fn list_active(&self) -> Vec<&Record> {
        self.records.iter().filter(|r| r.active).collect()
    }

    pub fn list_inactive(&self) -> Vec<&Record> {
        self.records.iter().filter(|r| !r.active).collect()
    }

    /// Case-insensitive substring search over active records.
    pub fn search(&self, term: &str) -> Result<Vec<&Record>> {
        let term = term.trim();
        if term.chars().count() < MIN_FIELD_LEN {
            return Err(TestrecError::validation(
                "search term",
                format!("{:?} must be at least {} characters", term, MIN_FIELD_LEN),
            ));
        }
        let needle = term.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| r.active && r.matches(&needle))
            .collect())
    }

    /// Starts a batch of field edits against a working copy of an active record.
    pub fn begin_edit(&self, id: u64) -> Result<RecordEdit> {
        let record = self.active_record(id)?;
        Ok(RecordEdit::new(record.clone()))
    }

    /// Writes every field changed in `edit`, or none of them.
    pub fn commit(&mut self, edit: RecordEdit) -> Result<Record> {
        let idx = self.find(edit.id())?;
        if !self.records[idx].active {
            return Err(TestrecError::NotFound(edit.id()));
        }
        if edit.changed.is_empty() || !edit.is_dirty() {
            return Ok(self.records[idx].clone());
        }

        let previous = self.records[idx].clone();
        let target = &mut self.records[idx];
        for field in &edit.changed {
            match field {
                Field::SystemName => target.system_name = edit.working.system_name.clone(),
                Field::TestType => target.test_type = edit.working.test_type.clone(),
                Field::Result => target.result = edit.working.result,
            }
        }

        self.persist_or(|store| store.records[idx] = previous)?;

        tracing::info!(id = edit.id(), fields = edit.changed.len(), "updated test record");
        Ok(self.records[idx].clone())
    }

    /// Single-field edit, committed immediately.
    pub fn update(&mut self, id: u64, field: Field, new_value: &str) -> Result<Record> {
        let mut edit = self.begin_edit(id)?;
        edit.set(field, new_value)?;
        self.commit(edit)
    }

    pub fn soft_delete(&mut self, id: u64) -> Result<Record> {
        let idx = self.find(id)?;
        if !self.records[idx].active {
            return Err(TestrecError::AlreadyDeleted(id));
        }

        self.records[idx].active = false;
        self.persist_or(|store| store.records[idx].active = true)?;

        tracing::info!(id, "deleted test record");
        Ok(self.records[idx].clone())
    }

    pub fn recover(&mut self, id: u64) -> Result<Record> {
        let idx = self.find(id)?;
        if self.records[idx].active {
            return Err(TestrecError::NotDeleted(id));
        }

        self.records[idx].active = true;
        self.persist_or(|store| store.records[idx].active = false)?;

        tracing::info!(id, "recovered test record");
        Ok(self.records[idx].clone())
    }

    /// Removes a soft-deleted record for good and returns it.
    ///
    /// A failed write puts the record back at its old position.
    pub fn permanent_delete(&mut self, id: u64) -> Result<Record> {
        let idx = self.find(id)?;
        if self.records[idx].active {
            return Err(TestrecError::MustSoftDeleteFirst(id));
        }

        let removed = self.records.remove(idx);
        let restore = removed.clone();
        self.persist_or(move |store| store.records.insert(idx, restore))?;

        tracing::info!(id, "purged test record");
        Ok(removed)
    }

    /// Rewrites the bound file from the current table.
    pub fn save(&self) -> Result<()> {
        let text = codec::encode(&self.records);
        self.backend
            .write(&self.path, &text)
            .map_err(|e| TestrecError::Persist {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        tracing::debug!(path = %self.path.display(), records = self.records.len(), "saved");
        Ok(())
    }

    fn persist_or<F: FnOnce(&mut Self)>(&mut self, undo: F) -> Result<()> {
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "save failed, rolling back");
            undo(self);
            return Err(e);
        }
        Ok(())
    }

    fn active_record(&self, id: u64) -> Result<&Record> {
        let record = self.get(id)?;
        if !record.active {
            return Err(TestrecError::NotFound(id));
        }
        Ok(record)
    }
}

fn load<B: StorageBackend>(backend: &B, path: &Path, create_if_missing: bool) -> Result<Loaded> {
    let Some(text) = backend.read(path)? else {
        if !create_if_missing {
            return Err(TestrecError::FileNotFound(path.to_path_buf()));
        }
        backend
            .write(path, &codec::encode(&[]))
            .map_err(|e| TestrecError::Persist {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        tracing::info!(path = %path.display(), "created new test file");
        return Ok(Loaded {
            records: Vec::new(),
            next_id: 1,
            warnings: Vec::new(),
        });
    };

    let decoded = codec::decode(&text).ok_or_else(|| TestrecError::HeaderMismatch {
        path: path.to_path_buf(),
        found: text.lines().next().unwrap_or("").to_string(),
    })?;

    for warning in &decoded.warnings {
        tracing::warn!(path = %path.display(), "{}", warning);
    }

    let next_id = decoded
        .records
        .iter()
        .map(|r| r.id)
        .max()
        .unwrap_or(0)
        .saturating_add(1);
    tracing::debug!(
        path = %path.display(),
        records = decoded.records.len(),
        next_id,
        "loaded"
    );

    Ok(Loaded {
        records: decoded.records,
        next_id,
        warnings: decoded.warnings,
    })
}

/// An uncommitted set of field edits for one record.
///
/// Each [`set`](RecordEdit::set) is validated on its own; nothing reaches the
/// store until [`RecordStore::commit`]. Dropping the edit discards it.
#[derive(Debug, Clone)]
pub struct RecordEdit {
    original: Record,
    working: Record,
    changed: Vec<Field>,
}

impl RecordEdit {
    fn new(record: Record) -> Self {
        Self {
            working: record.clone(),
            original: record,
            changed: Vec::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.original.id
    }

    pub fn original(&self) -> &Record {
        &self.original
    }

    pub fn working(&self) -> &Record {
        &self.working
    }

    pub fn changed_fields(&self) -> &[Field] {
        &self.changed
    }

    pub fn is_dirty(&self) -> bool {
        self.working != self.original
    }

    pub fn set(&mut self, field: Field, raw: &str) -> Result<()> {
        match field {
            Field::SystemName => self.working.system_name = check_name(raw)?,
            Field::TestType => self.working.test_type = check_type(raw)?,
            Field::Result => self.working.result = check_result(raw)?,
        }
        if !self.changed.contains(&field) {
            self.changed.push(field);
        }
        Ok(())
    }

    pub fn discard(self) {}
}
