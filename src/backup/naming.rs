//! Backup file naming
//!
//! Archival files are named `timer_backup_<YYYY-MM-DD_HH-MM-SS>.json` in UTC,
//! which sorts lexicographically in time order and contains no colons or
//! slashes. The latest copy always uses a fixed name.

use chrono::{DateTime, Utc};

/// Subdirectory of the container that backups are written into
pub const DOCUMENTS_DIR: &str = "Documents";

/// Prefix shared by every backup file
pub const BACKUP_PREFIX: &str = "timer_backup_";

/// Filename of the always-overwritten latest copy
pub const LATEST_FILENAME: &str = "timer_backup_latest.json";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Format a UTC instant with whole-second resolution
pub fn backup_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Archival filename for a save made at `at`
pub fn archive_filename(at: DateTime<Utc>) -> String {
    format!("{}{}.json", BACKUP_PREFIX, backup_timestamp(at))
}
