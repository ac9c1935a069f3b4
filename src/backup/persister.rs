//! Backup persister for timer-backup
//!
//! Writes a backup payload into a cloud container as a timestamped archival
//! file plus a fixed "latest" copy.

use std::path::PathBuf;

use super::clock::{Clock, SystemClock};
use super::naming::{archive_filename, DOCUMENTS_DIR, LATEST_FILENAME};
use crate::error::{BackupError, BackupResult};
use crate::storage::CloudStore;

/// Locations written by a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedBackup {
    /// Timestamped archival copy
    pub archive_path: PathBuf,
    /// Always-overwritten latest copy
    pub latest_path: PathBuf,
}

/// Persists backup payloads into a cloud store
///
/// Holds no state between calls: the container is resolved and the paths are
/// derived afresh on every save.
#[derive(Debug)]
pub struct BackupPersister<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: CloudStore> BackupPersister<S> {
    /// Create a persister using the system clock
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
        }
    }
}

impl<S: CloudStore, C: Clock> BackupPersister<S, C> {
    /// Create a persister with an explicit clock
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Save `payload` into the container named `container_id`
    ///
    /// The payload is written verbatim; an empty string is a valid payload.
    ///
    /// # Errors
    ///
    /// - `ContainerUnavailable` if the container cannot be resolved; nothing
    ///   is written.
    /// - `DirectoryCreationFailed` if the documents directory cannot be
    ///   created.
    /// - `WriteFailed` if either write fails. A failed latest write leaves the
    ///   archival file in place.
    pub fn save(&self, payload: &str, container_id: &str) -> BackupResult<SavedBackup> {
        let container = self
            .store
            .resolve_container(container_id)
            .ok_or_else(|| BackupError::container_unavailable(container_id))?;

        let documents = container.join(DOCUMENTS_DIR);
        self.store
            .create_directory(&documents)
            .map_err(|e| BackupError::directory_creation(documents.display().to_string(), e))?;

        let archive_path = documents.join(archive_filename(self.clock.now()));
        let latest_path = documents.join(LATEST_FILENAME);

        self.store
            .write_text(&archive_path, payload)
            .map_err(|e| BackupError::write_failed(archive_path.display().to_string(), e))?;

        // No rollback of the archival copy if this fails
        self.store
            .write_text(&latest_path, payload)
            .map_err(|e| BackupError::write_failed(latest_path.display().to_string(), e))?;

        Ok(SavedBackup {
            archive_path,
            latest_path,
        })
    }
}
