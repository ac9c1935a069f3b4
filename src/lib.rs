//! timer-backup - cloud backup bridge for the timer app
//!
//! This library receives a serialized backup from the app's UI layer and
//! persists it into a cloud-synchronized container: a timestamped archival
//! copy plus an always-overwritten `timer_backup_latest.json`.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `backup`: The persister, file naming, and clock
//! - `channel`: Request/response surface the UI layer calls (`saveBackup`)
//! - `storage`: Cloud store seam, local synced-directory store, atomic writes
//! - `config`: Path resolution and settings
//! - `audit`: Append-only log of handled calls
//! - `cli`: Command handlers for the `timer-backup` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use timer_backup::backup::BackupPersister;
//! use timer_backup::channel::{BackupChannel, MethodCall};
//! use timer_backup::storage::LocalCloudStore;
//!
//! let persister = BackupPersister::new(LocalCloudStore::new(containers_root));
//! let channel = BackupChannel::new("timer/backup", "iCloud.com.online404.timer", persister);
//! let response = channel.handle(&MethodCall::save_backup(r#"{"count":5}"#));
//! assert!(response.is_success());
//! ```

pub mod audit;
pub mod backup;
pub mod channel;
pub mod cli;
pub mod config;
pub mod error;
pub mod storage;

pub use error::BackupError;
