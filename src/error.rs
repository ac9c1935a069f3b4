//! Custom error types for timer-backup
//!
//! This module defines the error hierarchy for the backup bridge using
//! thiserror. Each variant maps to a wire code reported back to the UI layer.

use thiserror::Error;

/// Wire code for rejected requests
pub const CODE_INVALID_ARGS: &str = "invalid_args";
/// Wire code for an unreachable cloud container
pub const CODE_NO_CONTAINER: &str = "no_container";
/// Wire code for directory or file write failures
pub const CODE_WRITE_ERROR: &str = "write_error";

/// The main error type for backup operations
#[derive(Error, Debug)]
pub enum BackupError {
    /// Request missing or carrying a malformed payload
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The cloud container could not be resolved (no account, no entitlement)
    #[error("Cloud container unavailable: {container_id}")]
    ContainerUnavailable { container_id: String },

    /// The documents directory could not be provisioned
    #[error("Failed to create directory {path}: {message}")]
    DirectoryCreationFailed { path: String, message: String },

    /// Writing either backup file failed
    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: String, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors outside the backup path (settings, audit log)
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON encoding/decoding errors (responses, audit entries)
    #[error("JSON error: {0}")]
    Json(String),
}

impl BackupError {
    /// Create a "container unavailable" error
    pub fn container_unavailable(container_id: impl Into<String>) -> Self {
        Self::ContainerUnavailable {
            container_id: container_id.into(),
        }
    }

    /// Create a directory creation error from an underlying failure
    pub fn directory_creation(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::DirectoryCreationFailed {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create a write error from an underlying failure
    pub fn write_failed(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::WriteFailed {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Machine-readable code reported to the caller
    ///
    /// Directory provisioning and file writes share `write_error`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArguments(_) => CODE_INVALID_ARGS,
            Self::ContainerUnavailable { .. } => CODE_NO_CONTAINER,
            Self::DirectoryCreationFailed { .. } | Self::WriteFailed { .. } => CODE_WRITE_ERROR,
            Self::Config(_) => "config_error",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }

    /// Check if this is an invalid arguments error
    pub fn is_invalid_arguments(&self) -> bool {
        matches!(self, Self::InvalidArguments(_))
    }

    /// Check if this is a container resolution error
    pub fn is_container_unavailable(&self) -> bool {
        matches!(self, Self::ContainerUnavailable { .. })
    }

    /// Check if this is a write error
    pub fn is_write_failed(&self) -> bool {
        matches!(self, Self::WriteFailed { .. })
    }
}

impl From<std::io::Error> for BackupError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BackupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for backup operations
pub type BackupResult<T> = Result<T, BackupError>;
