//! Audit entry data structures
//!
//! Defines the outcome of a dispatched channel call and the entry format
//! itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BackupError;

/// How a dispatched call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Both backup files were written
    Success,
    /// The call was answered with an error
    Failure,
    /// The method is not handled by this channel
    NotImplemented,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success => write!(f, "SUCCESS"),
            Outcome::Failure => write!(f, "FAILURE"),
            Outcome::NotImplemented => write!(f, "NOT_IMPLEMENTED"),
        }
    }
}

/// A single audit log entry
///
/// Never carries the payload itself, only its size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the call was handled (UTC)
    pub timestamp: DateTime<Utc>,

    /// Method name as sent by the caller
    pub method: String,

    /// How the call ended
    pub outcome: Outcome,

    /// Target container, when the call got as far as the persister
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,

    /// Payload size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_bytes: Option<usize>,

    /// Archival filename written on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_file: Option<String>,

    /// Wire error code on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    /// Error message on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AuditEntry {
    fn new(method: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            timestamp: Utc::now(),
            method: method.into(),
            outcome,
            container_id: None,
            payload_bytes: None,
            archive_file: None,
            error_code: None,
            error_message: None,
        }
    }

    /// Entry for a save that wrote both files
    pub fn saved(
        method: impl Into<String>,
        container_id: impl Into<String>,
        payload_bytes: usize,
        archive_file: impl Into<String>,
    ) -> Self {
        Self {
            container_id: Some(container_id.into()),
            payload_bytes: Some(payload_bytes),
            archive_file: Some(archive_file.into()),
            ..Self::new(method, Outcome::Success)
        }
    }

    /// Entry for a call answered with an error
    pub fn failed(
        method: impl Into<String>,
        container_id: Option<String>,
        payload_bytes: Option<usize>,
        error: &BackupError,
    ) -> Self {
        Self {
            container_id,
            payload_bytes,
            error_code: Some(error.code().to_string()),
            error_message: Some(error.to_string()),
            ..Self::new(method, Outcome::Failure)
        }
    }

    /// Entry for a method this channel does not handle
    pub fn not_implemented(method: impl Into<String>) -> Self {
        Self::new(method, Outcome::NotImplemented)
    }

    /// Format the entry as a human-readable line
    pub fn format_human_readable(&self) -> String {
        let mut line = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.outcome,
            self.method
        );

        if let Some(container) = &self.container_id {
            line.push_str(&format!(" container={}", container));
        }
        if let Some(bytes) = self.payload_bytes {
            line.push_str(&format!(" bytes={}", bytes));
        }
        if let Some(file) = &self.archive_file {
            line.push_str(&format!(" file={}", file));
        }
        if let (Some(code), Some(message)) = (&self.error_code, &self.error_message) {
            line.push_str(&format!(" {}: {}", code, message));
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_entry() {
        let entry = AuditEntry::saved(
            "saveBackup",
            "iCloud.test",
            11,
            "timer_backup_2024-03-01_10-15-30.json",
        );

        assert_eq!(entry.outcome, Outcome::Success);
        assert_eq!(entry.container_id.as_deref(), Some("iCloud.test"));
        assert_eq!(entry.payload_bytes, Some(11));
        assert!(entry.error_code.is_none());
    }

    #[test]
    fn test_failed_entry_uses_wire_code() {
        let err = BackupError::container_unavailable("iCloud.test");
        let entry = AuditEntry::failed("saveBackup", Some("iCloud.test".into()), Some(3), &err);

        assert_eq!(entry.outcome, Outcome::Failure);
        assert_eq!(entry.error_code.as_deref(), Some("no_container"));
        assert!(entry.archive_file.is_none());
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = AuditEntry::not_implemented("restoreBackup");
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["outcome"], "not_implemented");
        assert_eq!(json["method"], "restoreBackup");
        assert!(json.get("container_id").is_none());
        assert!(json.get("error_code").is_none());
    }

    #[test]
    fn test_human_readable_format() {
        let err = BackupError::InvalidArguments("Missing payload for iCloud backup".into());
        let entry = AuditEntry::failed("saveBackup", None, None, &err);

        let line = entry.format_human_readable();
        assert!(line.contains("FAILURE saveBackup"));
        assert!(line.contains("invalid_args: Invalid arguments: Missing payload"));
    }
}
