//! Backup persistence for timer-backup
//!
//! Saves a backup payload handed over by the UI layer into a cloud-synced
//! container.
//!
//! # Layout
//!
//! Every save writes two files into `<container>/Documents`:
//! - `timer_backup_<YYYY-MM-DD_HH-MM-SS>.json`: archival copy named with the
//!   UTC save time
//! - `timer_backup_latest.json`: overwritten on every save
//!
//! File content is the raw payload; the `.json` suffix is a naming
//! convention only.
//!
//! # Example
//!
//! ```rust,ignore
//! use timer_backup::backup::BackupPersister;
//! use timer_backup::storage::LocalCloudStore;
//!
//! let store = LocalCloudStore::new(containers_root);
//! let persister = BackupPersister::new(store);
//! let saved = persister.save(r#"{"count":5}"#, "iCloud.com.online404.timer")?;
//! println!("{}", saved.archive_path.display());
//! ```

mod clock;
mod naming;
mod persister;

pub use clock::{Clock, FixedClock, SystemClock};
pub use naming::{archive_filename, backup_timestamp, DOCUMENTS_DIR, LATEST_FILENAME};
pub use persister::{BackupPersister, SavedBackup};
