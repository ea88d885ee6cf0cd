//! Recursive directory listing with modification timestamps

use std::fs;

use crate::{Error, NormalizedPath, Result, io};

/// A regular file found under a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the walked base directory
    pub relative: NormalizedPath,
    /// Full path usable for I/O
    pub absolute: NormalizedPath,
    /// Modification time, Unix epoch seconds
    pub modified: i64,
}

/// List every regular file under `base` whose extension equals `extension`
/// (case-insensitive). Pass `None` to list all files.
///
/// Results are sorted by relative path. A missing base directory yields an
/// empty list.
pub fn list_files(base: &NormalizedPath, extension: Option<&str>) -> Result<Vec<FileEntry>> {
    let mut files = Vec::new();

    if !base.is_dir() {
        tracing::debug!(dir = %base, "Directory does not exist, nothing to list");
        return Ok(files);
    }

    walk(base, base, extension, &mut files)?;
    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(files)
}

fn walk(
    base: &NormalizedPath,
    dir: &NormalizedPath,
    extension: Option<&str>,
    out: &mut Vec<FileEntry>,
) -> Result<()> {
    let native = dir.to_native();
    let entries = fs::read_dir(&native).map_err(|e| Error::io(&native, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| Error::io(&native, e))?;
        let path = NormalizedPath::new(entry.path());
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;

        if file_type.is_dir() {
            walk(base, &path, extension, out)?;
            continue;
        }

        // Leftovers from an interrupted atomic write
        if path.file_name().is_some_and(|n| n.starts_with('.') && n.ends_with(".tmp")) {
            continue;
        }

        let matches = match extension {
            Some(wanted) => path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted)),
            None => true,
        };
        if !matches {
            continue;
        }

        let Some(relative) = path.strip_prefix(base) else {
            continue;
        };

        out.push(FileEntry {
            relative,
            modified: io::modified_timestamp(&path)?,
            absolute: path,
        });
    }

    Ok(())
}
