//! CLI command handlers
//!
//! This module bridges the clap argument parsing with the backup channel.

pub mod audit;
pub mod backup;

pub use audit::handle_audit_command;
pub use backup::{handle_save, handle_serve, SaveArgs};

use crate::audit::AuditLogger;
use crate::backup::BackupPersister;
use crate::channel::BackupChannel;
use crate::config::{BridgePaths, Settings};
use crate::storage::LocalCloudStore;

/// Wire up the channel for this process
///
/// `container_override` replaces the configured container id.
pub fn build_channel(
    paths: &BridgePaths,
    settings: &Settings,
    container_override: Option<String>,
) -> BackupChannel<LocalCloudStore> {
    let store = LocalCloudStore::from_settings(paths, settings);
    let container_id = container_override.unwrap_or_else(|| settings.container_id.clone());
    let channel = BackupChannel::new(
        settings.channel_name.clone(),
        container_id,
        BackupPersister::new(store),
    );

    if settings.audit_enabled {
        channel.with_audit(AuditLogger::new(paths.audit_log()))
    } else {
        channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::MethodCall;
    use tempfile::TempDir;

    #[test]
    fn test_build_channel_uses_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BridgePaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();

        let channel = build_channel(&paths, &settings, None);
        assert_eq!(channel.container_id(), "iCloud.com.online404.timer");
        assert_eq!(channel.name(), "com.online404.timer/icloud_backup");
    }

    #[test]
    fn test_build_channel_with_override_and_audit() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BridgePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::create_dir_all(paths.containers_dir().join("iCloud.other")).unwrap();

        let channel = build_channel(&paths, &Settings::default(), Some("iCloud.other".into()));
        let response = channel.handle(&MethodCall::save_backup("payload"));

        assert!(response.is_success());
        assert!(paths
            .containers_dir()
            .join("iCloud.other")
            .join("Documents")
            .join("timer_backup_latest.json")
            .exists());
        assert!(paths.audit_log().exists());
    }

    #[test]
    fn test_audit_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BridgePaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            audit_enabled: false,
            ..Settings::default()
        };

        let channel = build_channel(&paths, &settings, None);
        channel.handle(&MethodCall::save_backup("payload"));

        assert!(!paths.audit_log().exists());
    }
}
