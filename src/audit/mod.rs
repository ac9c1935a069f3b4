//! Audit logging for timer-backup
//!
//! Records every call handled by the backup channel in an append-only
//! audit log kept next to the settings file, never inside the cloud
//! container.
//!
//! - `AuditEntry`: one handled call with its outcome, target container,
//!   payload size, and error code if any.
//! - `AuditLogger`: writes entries as line-delimited JSON (JSONL).

mod entry;
mod logger;

pub use entry::{AuditEntry, Outcome};
pub use logger::AuditLogger;
