//! Cloud store abstraction
//!
//! The persister only talks to storage through [`CloudStore`]. The local
//! implementation maps container identifiers onto directories that an
//! external sync client keeps in step with the cloud.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::file_io::write_text_atomic;
use crate::config::{BridgePaths, Settings};

/// Storage substrate a backup is written into
pub trait CloudStore {
    /// Resolve a container identifier to its base location
    ///
    /// Returns `None` when the container is not available (not signed in,
    /// not entitled, not provisioned). Called afresh for every save.
    fn resolve_container(&self, container_id: &str) -> Option<PathBuf>;

    /// Create a directory and all missing parents; existing is not an error
    fn create_directory(&self, path: &Path) -> io::Result<()>;

    /// Replace the file at `path` with `content`, all or nothing
    fn write_text(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Cloud store backed by locally synced directories
#[derive(Debug, Clone)]
pub struct LocalCloudStore {
    /// Root holding one directory per container id
    containers_root: PathBuf,
    /// Explicit container id -> directory overrides
    mappings: BTreeMap<String, PathBuf>,
}

impl LocalCloudStore {
    /// Create a store rooted at `containers_root`
    pub fn new(containers_root: PathBuf) -> Self {
        Self {
            containers_root,
            mappings: BTreeMap::new(),
        }
    }

    /// Create a store from the configured paths and container mappings
    pub fn from_settings(paths: &BridgePaths, settings: &Settings) -> Self {
        Self {
            containers_root: paths.containers_dir(),
            mappings: settings.containers.clone(),
        }
    }

    /// Map a container id to an explicit directory
    pub fn with_mapping(mut self, container_id: impl Into<String>, dir: PathBuf) -> Self {
        self.mappings.insert(container_id.into(), dir);
        self
    }

    /// Get the containers root
    pub fn containers_root(&self) -> &Path {
        &self.containers_root
    }

    fn candidate_dir(&self, container_id: &str) -> Option<PathBuf> {
        if let Some(dir) = self.mappings.get(container_id) {
            return Some(dir.clone());
        }

        // Unmapped ids must be a single plain path component
        let mut components = Path::new(container_id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(self.containers_root.join(container_id)),
            _ => None,
        }
    }
}

impl CloudStore for LocalCloudStore {
    fn resolve_container(&self, container_id: &str) -> Option<PathBuf> {
        // Only a container whose directory already exists counts as available
        self.candidate_dir(container_id).filter(|dir| dir.is_dir())
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        write_text_atomic(path, content)
    }
}
