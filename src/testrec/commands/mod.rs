use crate::config::TestrecConfig;
use crate::model::{Field, Record};
use crate::store::{RecordStore, StorageBackend};
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod delete;
pub mod files;
pub mod helpers;
pub mod init;
pub mod list;
pub mod purge;
pub mod recover;
pub mod search;
pub mod update;
pub mod view;

#[derive(Debug, Clone)]
pub struct TestrecPaths {
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<Record>,
    pub listed_records: Vec<Record>,
    pub files: Vec<PathBuf>,
    pub config: Option<TestrecConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<Record>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_files(mut self, files: Vec<PathBuf>) -> Self {
        self.files = files;
        self
    }

    pub fn with_config(mut self, config: TestrecConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// One pending field change for `update`.
#[derive(Debug, Clone)]
pub struct FieldEdit {
    pub field: Field,
    pub value: String,
}

impl FieldEdit {
    pub fn new(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Warnings recorded while the bound file was loaded.
pub fn load_messages<B: StorageBackend>(store: &RecordStore<B>) -> Vec<CmdMessage> {
    store
        .load_warnings()
        .iter()
        .map(|w| CmdMessage::warning(format!("{}: {}", store.path().display(), w)))
        .collect()
}

