//! # Storage Layer
//!
//! [`RecordStore`] owns the record table, the ID allocator and the bound file.
//! Raw I/O sits behind the [`StorageBackend`] trait so the table logic can be
//! tested without touching the filesystem.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production filesystem I/O
//!   - Whole-file rewrite through a tmp file and rename
//!   - No locking: one process owns a file for the whole session
//!
//! - [`mem_backend::MemBackend`]: In-memory files for testing
//!   - Can simulate write failures to exercise rollback
//!
//! ## Persistence Model
//!
//! A mutation is applied to the table, the table is encoded with
//! [`crate::codec::encode`], and the file is replaced. If the write fails the
//! mutation is reverted before the error is returned. Writes cost O(records)
//! per operation; there is no incremental append.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;

pub use backend::StorageBackend;
pub use record_store::{RecordEdit, RecordStore, DEFAULT_MAX_RECORDS};
