//! Storage layer for timer-backup
//!
//! Provides the [`CloudStore`] seam, a store backed by locally synced
//! container directories, and atomic text writes.

pub mod file_io;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use file_io::write_text_atomic;
pub use store::{CloudStore, LocalCloudStore};
