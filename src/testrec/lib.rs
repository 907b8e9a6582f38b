//! # Testrec Architecture
//!
//! Testrec keeps a list of test records (ID, system name, test type, result,
//! active flag) in a plain CSV file. It is a library with a CLI client, not the
//! other way round.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses arguments, renders tables, asks y/n questions     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, validates raw IDs             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One operation per module, returns CmdResult              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/), Codec (codec.rs), Validators (validate.rs) │
//! │  - RecordStore: table, ID allocator, rollback on failed save│
//! │  - StorageBackend: FsBackend (production), MemBackend (test)│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Record Lifecycle
//!
//! ```text
//! create ──► Active ◄──── recover ────┐
//!              │                      │
//!              └──── soft_delete ──► Deleted ── permanent_delete ──► (removed)
//! ```
//!
//! An active record can't be removed directly. IDs are never reused within a
//! session; on load the allocator restarts at `max(id) + 1`.
//!
//! ## Concurrency
//!
//! Everything is synchronous and single-threaded. The bound file is assumed
//! to belong to one process; nothing is locked.

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod validate;
