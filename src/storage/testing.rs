//! In-memory cloud store for unit tests

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use super::store::CloudStore;

/// A storage call observed by [`RecordingStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Resolve(String),
    CreateDirectory(PathBuf),
    WriteText(PathBuf),
}

/// Records every call and keeps written files in memory
///
/// Failures can be injected per path.
#[derive(Debug, Default)]
pub struct RecordingStore {
    container: Option<PathBuf>,
    fail_create: bool,
    fail_writes_to: Vec<PathBuf>,
    calls: RefCell<Vec<StoreCall>>,
    files: RefCell<BTreeMap<PathBuf, String>>,
}

impl RecordingStore {
    /// Store whose every container resolves to `base`
    pub fn available(base: impl Into<PathBuf>) -> Self {
        Self {
            container: Some(base.into()),
            ..Self::default()
        }
    }

    /// Store with no container available
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_write(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_writes_to.push(path.into());
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, StoreCall::WriteText(_)))
            .count()
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }
}

impl CloudStore for RecordingStore {
    fn resolve_container(&self, container_id: &str) -> Option<PathBuf> {
        self.calls
            .borrow_mut()
            .push(StoreCall::Resolve(container_id.to_string()));
        self.container.clone()
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        self.calls
            .borrow_mut()
            .push(StoreCall::CreateDirectory(path.to_path_buf()));
        if self.fail_create {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Permission denied",
            ));
        }
        Ok(())
    }

    fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        self.calls
            .borrow_mut()
            .push(StoreCall::WriteText(path.to_path_buf()));
        if self.fail_writes_to.iter().any(|p| p == path) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "No space left on device",
            ));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
