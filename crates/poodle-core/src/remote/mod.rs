//! The remote store a replica is synchronized with
//!
//! A remote store holds named multi-file blobs. The local replica lives in a
//! single file of the blob, [`PAYLOAD_FILE`], as a JSON [`ReplicaStore`].
//!
//! [`ReplicaStore`]: crate::ReplicaStore

mod gist;

pub use gist::{GITHUB_API, GistClient};

use std::collections::BTreeMap;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::replica::ReplicaStore;
use crate::{Error, Result};

/// File key of the serialized replica inside the blob.
pub const PAYLOAD_FILE: &str = "poodle";

/// Description given to blobs created by poodle.
pub const BLOB_DESCRIPTION: &str = "Poodle";

/// Result of checking the configured credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthStatus {
    /// Raw scope list reported by the store
    pub scopes: String,
    pub valid: bool,
}

/// One file of a blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobFile {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub filename: String,
}

/// A blob to create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub description: String,
    pub public: bool,
    pub files: BTreeMap<String, BlobFile>,
}

impl Blob {
    /// A blob whose payload file holds `store`.
    pub fn with_payload(public: bool, store: &ReplicaStore) -> Result<Self> {
        let mut files = BTreeMap::new();
        files.insert(
            PAYLOAD_FILE.to_string(),
            BlobFile {
                content: store.to_json()?,
                filename: PAYLOAD_FILE.to_string(),
            },
        );
        Ok(Self {
            description: BLOB_DESCRIPTION.to_string(),
            public,
            files,
        })
    }
}

/// A blob as returned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobResponse {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub public: bool,
    /// RFC 3339
    #[serde(default)]
    pub created_at: String,
    /// RFC 3339
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub files: BTreeMap<String, BlobFile>,
}

impl BlobResponse {
    /// `updated_at` as Unix epoch seconds.
    pub fn updated_timestamp(&self) -> Result<i64> {
        DateTime::parse_from_rfc3339(&self.updated_at)
            .map(|t| t.timestamp())
            .map_err(|e| Error::PayloadDecode {
                message: format!("invalid updated_at '{}': {}", self.updated_at, e),
            })
    }

    /// Decode the replica stored in the payload file.
    ///
    /// A blob without a payload file is an empty replica.
    pub fn replica(&self) -> Result<ReplicaStore> {
        match self.files.get(PAYLOAD_FILE) {
            Some(file) => ReplicaStore::from_json(&file.content),
            None => Ok(ReplicaStore::new()),
        }
    }

    pub fn has_payload(&self) -> bool {
        self.files.contains_key(PAYLOAD_FILE)
    }
}

/// Get/create/update access to named blobs.
pub trait RemoteStore {
    /// Check that the credentials may read and write blobs.
    fn auth_check(&self) -> Result<AuthStatus>;

    fn create(&self, blob: &Blob) -> Result<BlobResponse>;

    /// # Errors
    ///
    /// `RemoteNotFound` when no blob has this id.
    fn get(&self, id: &str) -> Result<BlobResponse>;

    fn update(&self, id: &str, blob: &Blob) -> Result<BlobResponse>;
}

impl<R: RemoteStore + ?Sized> RemoteStore for &R {
    fn auth_check(&self) -> Result<AuthStatus> {
        (**self).auth_check()
    }

    fn create(&self, blob: &Blob) -> Result<BlobResponse> {
        (**self).create(blob)
    }

    fn get(&self, id: &str) -> Result<BlobResponse> {
        (**self).get(id)
    }

    fn update(&self, id: &str, blob: &Blob) -> Result<BlobResponse> {
        (**self).update(id, blob)
    }
}
