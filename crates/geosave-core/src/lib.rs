//! geosave-core - Core library for geosave
//!
//! This crate contains the incremental sync engine used by the `geosave` CLI:
//! feed pagination, payload classification, ordered downloads and the durable
//! checkpoint that makes every run resumable.

pub mod api;
pub mod checkpoint;
pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod sync;
pub mod util;

pub use checkpoint::{Checkpoint, CheckpointStore, FileCheckpointStore};
pub use config::{SyncConfig, SyncEndpoints};
pub use error::{Error, Result};
pub use models::{EndpointFamily, FeedPage, GameId, GameMode, RawEntry, SyncCandidate};
pub use storage::{DirectoryStore, RecordStore, RunGuard};
pub use sync::{Notifier, Severity, SyncEngine, SyncSummary};
