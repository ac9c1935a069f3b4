//! Audit CLI command

use crate::audit::AuditLogger;
use crate::error::BackupResult;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(logger: &AuditLogger, limit: usize) -> BackupResult<()> {
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
