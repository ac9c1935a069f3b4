//! Inbound method calls
//!
//! A `MethodCall` is the untyped call handed over by the UI layer; a
//! `BridgeRequest` is the typed request the channel dispatches on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BackupError, BackupResult};

/// Method that persists a backup payload
pub const SAVE_BACKUP_METHOD: &str = "saveBackup";

/// Message reported when the payload field is absent or not text
pub const MISSING_PAYLOAD_MESSAGE: &str = "Missing payload for iCloud backup";

/// A named method call with loosely typed arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Optional correlation id, echoed back in the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: None,
            method: method.into(),
            arguments,
        }
    }

    /// A `saveBackup` call carrying `data`
    pub fn save_backup(data: impl Into<String>) -> Self {
        Self::new(
            SAVE_BACKUP_METHOD,
            serde_json::json!({ "data": data.into() }),
        )
    }
}

/// Typed requests understood by the backup channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeRequest {
    /// Persist `data` as the newest backup
    SaveBackup { data: String },
}

impl BridgeRequest {
    /// Parse a method call into a typed request
    ///
    /// Returns `Ok(None)` for methods this channel does not implement.
    ///
    /// # Errors
    ///
    /// `InvalidArguments` when a known method is called with arguments that
    /// are not a map or lack a text `data` field.
    pub fn parse(call: &MethodCall) -> BackupResult<Option<Self>> {
        match call.method.as_str() {
            SAVE_BACKUP_METHOD => {
                let data = call
                    .arguments
                    .as_object()
                    .and_then(|args| args.get("data"))
                    .and_then(Value::as_str)
                    .ok_or_else(|| BackupError::InvalidArguments(MISSING_PAYLOAD_MESSAGE.into()))?;

                Ok(Some(Self::SaveBackup {
                    data: data.to_string(),
                }))
            }
            _ => Ok(None),
        }
    }

    /// Method name of this request
    pub fn method(&self) -> &'static str {
        match self {
            Self::SaveBackup { .. } => SAVE_BACKUP_METHOD,
        }
    }
}
