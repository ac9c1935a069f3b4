//! User settings for timer-backup
//!
//! Holds the container identifier, channel name, local container mappings,
//! and audit preferences.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::BridgePaths;
use crate::error::BackupError;
use crate::storage::write_text_atomic;

/// Container the timer app backs up into
pub const DEFAULT_CONTAINER_ID: &str = "iCloud.com.online404.timer";

/// Channel the UI layer sends backup calls on
pub const DEFAULT_CHANNEL_NAME: &str = "com.online404.timer/icloud_backup";

/// Settings for timer-backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Container that `saveBackup` calls are persisted into
    #[serde(default = "default_container_id")]
    pub container_id: String,

    /// Name of the inbound channel, reported by `config`
    #[serde(default = "default_channel_name")]
    pub channel_name: String,

    /// Explicit container id -> synced directory mappings
    ///
    /// Containers not listed here resolve under the containers directory.
    #[serde(default)]
    pub containers: BTreeMap<String, PathBuf>,

    /// Whether dispatched calls are recorded in the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_container_id() -> String {
    DEFAULT_CONTAINER_ID.to_string()
}

fn default_channel_name() -> String {
    DEFAULT_CHANNEL_NAME.to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            container_id: default_container_id(),
            channel_name: default_channel_name(),
            containers: BTreeMap::new(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &BridgePaths) -> Result<Self, BackupError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BackupError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BackupError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BridgePaths) -> Result<(), BackupError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BackupError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        write_text_atomic(&settings_path, &contents).map_err(|e| {
            BackupError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
