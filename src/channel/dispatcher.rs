//! Backup channel dispatching method calls to the persister

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use super::call::{BridgeRequest, MethodCall};
use super::response::BridgeResponse;
use crate::audit::{AuditEntry, AuditLogger};
use crate::backup::{BackupPersister, Clock, SystemClock};
use crate::error::{BackupError, BackupResult};
use crate::storage::CloudStore;

/// Method name recorded for lines that are not a method call at all
const MALFORMED_METHOD: &str = "(malformed)";

/// Inbound request/response surface for backup calls
///
/// Owns the persister it dispatches to; the persister knows nothing of the
/// channel.
pub struct BackupChannel<S, C = SystemClock> {
    /// Channel name, for diagnostics
    name: String,
    /// Container every save is written into
    container_id: String,
    persister: BackupPersister<S, C>,
    audit: Option<AuditLogger>,
}

impl<S: CloudStore, C: Clock> BackupChannel<S, C> {
    pub fn new(
        name: impl Into<String>,
        container_id: impl Into<String>,
        persister: BackupPersister<S, C>,
    ) -> Self {
        Self {
            name: name.into(),
            container_id: container_id.into(),
            persister,
            audit: None,
        }
    }

    /// Record every handled call in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn persister(&self) -> &BackupPersister<S, C> {
        &self.persister
    }

    /// Handle a single method call
    pub fn handle(&self, call: &MethodCall) -> BridgeResponse {
        debug!(channel = %self.name, method = %call.method, "handling call");

        let response = match BridgeRequest::parse(call) {
            Ok(Some(BridgeRequest::SaveBackup { data })) => self.save_backup(call, &data),
            Ok(None) => {
                debug!(method = %call.method, "method not implemented");
                self.record(AuditEntry::not_implemented(&call.method));
                BridgeResponse::not_implemented()
            }
            Err(err) => {
                warn!(method = %call.method, error = %err, "rejected call");
                self.record(AuditEntry::failed(&call.method, None, None, &err));
                BridgeResponse::from_error(&err)
            }
        };

        response.with_id(call.id.clone())
    }

    /// Handle one JSON-encoded method call
    ///
    /// Lines that do not decode into a method call are answered with
    /// `invalid_args`.
    pub fn handle_line(&self, line: &str) -> BridgeResponse {
        match serde_json::from_str::<MethodCall>(line) {
            Ok(call) => self.handle(&call),
            Err(e) => self.reject_line(format!("Malformed method call: {}", e)),
        }
    }

    fn reject_line(&self, message: String) -> BridgeResponse {
        let err = BackupError::InvalidArguments(message);
        warn!(error = %err, "rejected line");
        self.record(AuditEntry::failed(MALFORMED_METHOD, None, None, &err));
        BridgeResponse::from_error(&err)
    }

    /// Serve line-delimited calls from `reader`, one response line each
    ///
    /// Blank lines are skipped and lines that are not UTF-8 are answered with
    /// `invalid_args`. Returns the number of calls answered once the reader
    /// is exhausted.
    pub fn serve<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> BackupResult<usize> {
        let mut handled = 0;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break; // EOF
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line.trim()),
                Err(e) => self.reject_line(format!("Method call is not valid UTF-8: {}", e)),
            };

            serde_json::to_writer(&mut writer, &response)?;
            writeln!(writer)?;
            writer.flush()?;
            handled += 1;
        }

        Ok(handled)
    }

    fn save_backup(&self, call: &MethodCall, data: &str) -> BridgeResponse {
        match self.persister.save(data, &self.container_id) {
            Ok(saved) => {
                let archive_file = saved
                    .archive_path
                    .file_name()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                info!(
                    container = %self.container_id,
                    bytes = data.len(),
                    file = %archive_file,
                    "backup saved"
                );
                self.record(AuditEntry::saved(
                    &call.method,
                    &self.container_id,
                    data.len(),
                    archive_file,
                ));
                BridgeResponse::success()
            }
            Err(err) => {
                warn!(container = %self.container_id, error = %err, "backup failed");
                self.record(AuditEntry::failed(
                    &call.method,
                    Some(self.container_id.clone()),
                    Some(data.len()),
                    &err,
                ));
                BridgeResponse::from_error(&err)
            }
        }
    }

    /// Audit failures are logged and never change the reply
    fn record(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!(path = %logger.path().display(), error = %e, "failed to record audit entry");
            }
        }
    }
}
