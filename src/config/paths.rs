//! Path management for timer-backup
//!
//! Provides path resolution for settings, the audit log, and locally mapped
//! cloud containers.
//!
//! ## Path Resolution Order
//!
//! 1. `TIMER_BACKUP_HOME` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (e.g. `~/.config/timer-backup` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BackupError;

/// Environment variable overriding the base directory
pub const HOME_ENV_VAR: &str = "TIMER_BACKUP_HOME";

/// Manages all paths used by timer-backup
#[derive(Debug, Clone)]
pub struct BridgePaths {
    /// Base directory for settings and local state
    base_dir: PathBuf,
}

impl BridgePaths {
    /// Create a new BridgePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform config directory can be determined.
    pub fn new() -> Result<Self, BackupError> {
        let base_dir = match std::env::var_os(HOME_ENV_VAR) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create BridgePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Directory holding one subdirectory per locally synced container
    pub fn containers_dir(&self) -> PathBuf {
        self.base_dir.join("containers")
    }

    /// Ensure the base directory exists
    ///
    /// Container directories are deliberately left alone: their presence is
    /// what marks a container as available.
    pub fn ensure_directories(&self) -> Result<(), BackupError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BackupError::Io(format!("Failed to create base directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, BackupError> {
    ProjectDirs::from("com", "online404", "timer-backup")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BackupError::Config("Could not determine config directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BridgePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert_eq!(paths.containers_dir(), temp_dir.path().join("containers"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var(HOME_ENV_VAR, temp_dir.path());
        let paths = BridgePaths::new().unwrap();
        env::remove_var(HOME_ENV_VAR);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BridgePaths::with_base_dir(temp_dir.path().join("nested").join("home"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(!paths.containers_dir().exists());
    }
}
