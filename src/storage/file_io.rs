//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't leave partially written backups
//! behind on failure.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;

/// Write text to a file atomically (write to temp, then rename)
///
/// The temp file is created in the target's directory so the final rename
/// stays on one filesystem. Each call gets its own uniquely named temp file,
/// so concurrent writers to the same target never share one. The parent
/// directory must already exist.
///
/// A replaced file keeps its permissions; a new file gets the same mode a
/// plain create would (0666 minus the umask).
pub fn write_text_atomic<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    builder.prefix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    // Dropped (and removed) on any early return below
    let mut temp = builder.tempfile_in(parent)?;

    if let Ok(existing) = fs::metadata(path) {
        if existing.is_file() {
            temp.as_file().set_permissions(existing.permissions())?;
        }
    }

    temp.write_all(content.as_bytes())?;
    temp.flush()?;

    // Sync to disk before rename
    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
