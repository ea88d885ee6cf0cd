//! Atomic I/O operations with file locking

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock to prevent concurrent access.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e))?;

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Remove a single file.
pub fn remove_file(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    fs::remove_file(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Modification time of a file as Unix epoch seconds.
pub fn modified_timestamp(path: &NormalizedPath) -> Result<i64> {
    let native = path.to_native();
    let modified = fs::metadata(&native)
        .and_then(|meta| meta.modified())
        .map_err(|e| Error::io(&native, e))?;
    Ok(DateTime::<Utc>::from(modified).timestamp())
}

/// Set the modification time of a file from Unix epoch seconds.
pub fn set_modified_timestamp(path: &NormalizedPath, timestamp: i64) -> Result<()> {
    let native = path.to_native();
    let when: SystemTime = DateTime::<Utc>::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .into();

    let file = File::options()
        .write(true)
        .open(&native)
        .map_err(|e| Error::io(&native, e))?;
    file.set_modified(when).map_err(|e| Error::io(&native, e))
}
