//! Append-only JSONL audit log
//!
//! One JSON object per line. Each entry goes out in a single `write_all` on
//! an `O_APPEND` handle, so lines from concurrent bridge processes do not
//! interleave. Reads skip lines that do not decode instead of failing the
//! whole log.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::error::{BackupError, BackupResult};

use super::entry::AuditEntry;

/// Appends handled calls to the audit log and reads them back
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append `entry` as one line
    pub fn log(&self, entry: &AuditEntry) -> BackupResult<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| file.write_all(&line))
            .map_err(|e| {
                BackupError::Io(format!(
                    "Failed to append to audit log {}: {}",
                    self.log_path.display(),
                    e
                ))
            })
    }

    /// Read every decodable entry, oldest first
    ///
    /// A missing log reads as empty. Corrupt lines (truncated writes, bad
    /// bytes) are reported through `tracing` and skipped.
    pub fn read_all(&self) -> BackupResult<Vec<AuditEntry>> {
        let contents = match fs::read(&self.log_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(BackupError::Io(format!(
                    "Failed to read audit log {}: {}",
                    self.log_path.display(),
                    e
                )))
            }
        };

        let entries: Vec<AuditEntry> = contents
            .split(|b| *b == b'\n')
            .enumerate()
            .filter(|(_, line)| !line.iter().all(u8::is_ascii_whitespace))
            .filter_map(|(index, line)| match serde_json::from_slice::<AuditEntry>(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(
                        path = %self.log_path.display(),
                        line = index + 1,
                        error = %e,
                        "skipping corrupt audit entry"
                    );
                    None
                }
            })
            .collect();

        Ok(entries)
    }

    /// Read the most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> BackupResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Outcome;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path);
        (logger, temp_dir)
    }

    #[test]
    fn test_log_and_read_back() {
        let (logger, _temp) = create_test_logger();

        logger
            .log(&AuditEntry::saved("saveBackup", "iCloud.test", 4, "a.json"))
            .unwrap();
        logger
            .log(&AuditEntry::not_implemented("restoreBackup"))
            .unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].outcome, Outcome::Success);
        assert_eq!(entries[1].method, "restoreBackup");
    }

    #[test]
    fn test_log_is_jsonl() {
        let (logger, _temp) = create_test_logger();

        logger
            .log(&AuditEntry::not_implemented("first"))
            .unwrap();
        logger
            .log(&AuditEntry::not_implemented("second"))
            .unwrap();

        let contents = std::fs::read_to_string(logger.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            serde_json::from_str::<serde_json::Value>(line).unwrap();
        }
    }

    #[test]
    fn test_corrupt_lines_are_skipped() {
        let (logger, _temp) = create_test_logger();

        logger
            .log(&AuditEntry::not_implemented("before"))
            .unwrap();
        {
            let mut file = OpenOptions::new()
                .append(true)
                .open(logger.path())
                .unwrap();
            file.write_all(b"{\"timestamp\":\"2024-03-01T10:15:30Z\",\"meth\n").unwrap();
            file.write_all(b"\xff\xfe not json\n\n").unwrap();
        }
        logger
            .log(&AuditEntry::not_implemented("after"))
            .unwrap();

        let entries = logger.read_all().unwrap();
        let methods: Vec<&str> = entries.iter().map(|e| e.method.as_str()).collect();
        assert_eq!(methods, vec!["before", "after"]);
    }

    #[test]
    fn test_read_missing_log() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();

        for i in 0..5 {
            logger
                .log(&AuditEntry::not_implemented(format!("method{}", i)))
                .unwrap();
        }

        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].method, "method3");
        assert_eq!(recent[1].method, "method4");

        assert_eq!(logger.read_recent(10).unwrap().len(), 5);
    }

    #[test]
    fn test_log_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("missing").join("audit.log"));

        let err = logger
            .log(&AuditEntry::not_implemented("saveBackup"))
            .unwrap_err();
        assert!(matches!(err, BackupError::Io(_)));
    }
}
