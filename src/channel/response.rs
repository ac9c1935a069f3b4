//! Responses sent back to the UI layer

use serde::Serialize;
use serde_json::Value;

use crate::error::BackupError;

/// Error object returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelError {
    pub code: String,
    pub message: String,
}

/// How a call was answered
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResponseOutcome {
    /// Always carries `null`
    Success { result: Value },
    Error { error: ChannelError },
    NotImplemented,
}

/// Response to a single method call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(flatten)]
    pub outcome: ResponseOutcome,
}

impl BridgeResponse {
    /// Create an empty acknowledgement
    pub fn success() -> Self {
        Self {
            id: None,
            outcome: ResponseOutcome::Success {
                result: Value::Null,
            },
        }
    }

    /// Create an error response
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: None,
            outcome: ResponseOutcome::Error {
                error: ChannelError {
                    code: code.into(),
                    message: message.into(),
                },
            },
        }
    }

    /// Create error from BackupError
    pub fn from_error(err: &BackupError) -> Self {
        Self::error(err.code(), err.to_string())
    }

    /// Create a "method not implemented" response
    pub fn not_implemented() -> Self {
        Self {
            id: None,
            outcome: ResponseOutcome::NotImplemented,
        }
    }

    /// Attach the caller's correlation id
    pub fn with_id(mut self, id: Option<Value>) -> Self {
        self.id = id;
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ResponseOutcome::Success { .. })
    }

    /// Error code, if this is an error response
    pub fn error_code(&self) -> Option<&str> {
        match &self.outcome {
            ResponseOutcome::Error { error } => Some(&error.code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_wire_format() {
        let json = serde_json::to_value(BridgeResponse::success()).unwrap();
        assert_eq!(json, json!({ "status": "success", "result": null }));
    }

    #[test]
    fn test_error_wire_format() {
        let err = BackupError::container_unavailable("iCloud.test");
        let json = serde_json::to_value(BridgeResponse::from_error(&err).with_id(Some(json!(7)))).unwrap();

        assert_eq!(
            json,
            json!({
                "id": 7,
                "status": "error",
                "error": {
                    "code": "no_container",
                    "message": "Cloud container unavailable: iCloud.test"
                }
            })
        );
    }

    #[test]
    fn test_not_implemented_wire_format() {
        let response = BridgeResponse::not_implemented();
        assert!(!response.is_success());
        assert_eq!(response.error_code(), None);
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({ "status": "not_implemented" })
        );
    }
}
