//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for testrec operations, whatever UI sits on top.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (raw ID strings → validated IDs)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no printing, and no prompting. Destructive
//! calls run as soon as they are made; asking the user first is the caller's
//! job.
//!
//! `TestrecApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `TestrecApi<FsBackend>`
//! - Testing: `TestrecApi<MemBackend>`

use crate::commands;
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};
use crate::validate::check_id;
use std::path::{Path, PathBuf};

/// The main API facade for testrec operations.
pub struct TestrecApi<B: StorageBackend> {
    store: RecordStore<B>,
    paths: commands::TestrecPaths,
}

impl<B: StorageBackend> TestrecApi<B> {
    pub fn new(store: RecordStore<B>, paths: commands::TestrecPaths) -> Self {
        Self { store, paths }
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    /// Warnings from loading the bound file.
    pub fn load_messages(&self) -> Vec<commands::CmdMessage> {
        commands::load_messages(&self.store)
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.store)
    }

    /// Rebinds to another file, replacing the loaded table.
    pub fn bind_file(
        &mut self,
        path: impl Into<PathBuf>,
        create_if_missing: bool,
    ) -> Result<commands::CmdResult> {
        self.store.rebind(path, create_if_missing)?;
        commands::init::run(&self.store)
    }

    pub fn create_record(
        &mut self,
        system_name: &str,
        test_type: &str,
        result: &str,
    ) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, system_name, test_type, result)
    }

    pub fn list_records(&self, deleted: bool) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, deleted)
    }

    pub fn view_records<I: AsRef<str>>(&self, ids: &[I]) -> Result<commands::CmdResult> {
        let ids = parse_ids(ids)?;
        commands::view::run(&self.store, &ids)
    }

    pub fn search_records(&self, term: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, term)
    }

    pub fn update_record(
        &mut self,
        id: &str,
        edits: &[commands::FieldEdit],
    ) -> Result<commands::CmdResult> {
        let id = check_id(id)?;
        commands::update::run(&mut self.store, id, edits)
    }

    pub fn delete_records<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<commands::CmdResult> {
        let ids = parse_ids(ids)?;
        commands::delete::run(&mut self.store, &ids)
    }

    pub fn recover_records<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<commands::CmdResult> {
        let ids = parse_ids(ids)?;
        commands::recover::run(&mut self.store, &ids)
    }

    pub fn purge_records<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<commands::CmdResult> {
        let ids = parse_ids(ids)?;
        commands::purge::run(&mut self.store, &ids)
    }

    pub fn data_files(&self, dir: &Path) -> Result<commands::CmdResult> {
        commands::files::run(self.store.backend(), dir)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }
}

/// File discovery without a bound store.
pub fn data_files<B: StorageBackend>(backend: &B, dir: &Path) -> Result<commands::CmdResult> {
    commands::files::run(backend, dir)
}

/// Config access without a bound store.
pub fn config(paths: &commands::TestrecPaths, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(paths, action)
}

fn parse_ids<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<u64>> {
    inputs.iter().map(|s| check_id(s.as_ref())).collect()
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, FieldEdit, MessageLevel, TestrecPaths};
