//! Configuration module for timer-backup
//!
//! This module provides configuration management including:
//! - Base directory resolution
//! - Settings persistence
//! - Local container mappings

pub mod paths;
pub mod settings;

pub use paths::BridgePaths;
pub use settings::Settings;
