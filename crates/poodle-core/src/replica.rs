//! One side of the synchronized file set
//!
//! Serialized as the document stored under the `poodle` key of the remote
//! blob:
//!
//! ```json
//! { "Files": { "team/billing.toml": { "ModTimestamp": 1600000000, "Content": "...", "Name": "team/billing.toml" } } }
//! ```

use std::collections::BTreeMap;

use poodle_fs::{NormalizedPath, io, list_files};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A file of a replica, identified by its relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaFile {
    /// Unix epoch seconds, `0` when the payload does not carry one
    #[serde(rename = "ModTimestamp", default)]
    pub modified: i64,
    #[serde(rename = "Content")]
    pub content: String,
    #[serde(rename = "Name")]
    pub name: String,
}

impl ReplicaFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>, modified: i64) -> Self {
        Self {
            modified,
            content: content.into(),
            name: name.into(),
        }
    }
}

/// A remote key may only name a file inside the local directory, and must
/// already be in canonical form so that two keys never alias one file.
fn is_safe_key(key: &str) -> bool {
    let path = NormalizedPath::new(key);
    path.is_safe_relative() && path.as_str() == key
}

/// Relative path to file mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaStore {
    #[serde(rename = "Files", default)]
    pub files: BTreeMap<String, ReplicaFile>,
}

impl ReplicaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every file under `dir` with the given extension.
    pub fn load_from_local(dir: &NormalizedPath, extension: &str) -> Result<Self> {
        let mut store = Self::new();
        for entry in list_files(dir, Some(extension))? {
            let content = io::read_text(&entry.absolute)?;
            let key = entry.relative.as_str().to_string();
            store
                .files
                .insert(key.clone(), ReplicaFile::new(key, content, entry.modified));
        }
        tracing::debug!(dir = %dir, files = store.len(), "Loaded local replica");
        Ok(store)
    }

    /// Write the store into `dir`.
    ///
    /// Only files that are new or whose content differs are written; every
    /// file's modification time is set to its replica timestamp. Returns the
    /// paths whose content was written.
    ///
    /// All keys are checked before anything is written, so an unsafe key
    /// leaves the directory untouched.
    pub fn dump_locally(&self, dir: &NormalizedPath) -> Result<Vec<String>> {
        if let Some(bad) = self.files.keys().find(|key| !is_safe_key(key)) {
            return Err(Error::UnsafePath { path: bad.clone() });
        }

        let mut written = Vec::new();
        for (key, file) in &self.files {
            let path = dir.join(key);

            let unchanged = path.is_file() && io::read_text(&path)? == file.content;
            if !unchanged {
                io::write_text(&path, &file.content)?;
                tracing::debug!(path = %path, "Wrote local file");
                written.push(key.clone());
            }

            if io::modified_timestamp(&path)? != file.modified {
                io::set_modified_timestamp(&path, file.modified)?;
            }
        }
        Ok(written)
    }

    /// Decode a serialized store.
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| Error::PayloadDecode {
            message: e.to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn insert(&mut self, file: ReplicaFile) {
        self.files.insert(file.name.clone(), file);
    }

    pub fn get(&self, path: &str) -> Option<&ReplicaFile> {
        self.files.get(path)
    }

    pub fn remove(&mut self, path: &str) -> Option<ReplicaFile> {
        self.files.remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
