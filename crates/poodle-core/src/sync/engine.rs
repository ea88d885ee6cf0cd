//! SyncEngine implementation
//!
//! One sync is a fixed sequence of remote calls:
//!
//! ```text
//! auth_check -> [create] -> get -> merge -> write local -> [update]
//! ```
//!
//! Nothing is written locally until every remote read has succeeded.

use poodle_fs::NormalizedPath;

use super::state::{SyncState, determine_direction};
use crate::merge::{MergeReport, merge};
use crate::remote::{Blob, BlobResponse, RemoteStore};
use crate::replica::ReplicaStore;
use crate::{Error, Result};

/// Extension of the files taking part in a sync.
pub const SYNC_EXTENSION: &str = "toml";

/// Outcome of a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Direction computed before merging
    pub state: SyncState,
    /// Blob the replica is stored in
    pub blob_id: String,
    /// Whether the blob had to be created during this sync
    pub created: bool,
    /// Paths written to the local directory
    pub downloaded: Vec<String>,
    /// Paths sent to the remote store
    pub uploaded: Vec<String>,
    /// Paths left untouched because both sides changed at the same second
    pub conflicts: Vec<String>,
}

impl SyncReport {
    /// Nothing moved in either direction.
    pub fn is_up_to_date(&self) -> bool {
        self.downloaded.is_empty() && self.uploaded.is_empty()
    }
}

/// Synchronizes a local directory with a blob of a [`RemoteStore`].
pub struct SyncEngine<R> {
    remote: R,
    directory: NormalizedPath,
    public: bool,
}

impl<R: RemoteStore> SyncEngine<R> {
    /// # Arguments
    ///
    /// * `remote` - The store holding the blob
    /// * `directory` - The local services directory
    /// * `public` - Visibility of blobs created by this engine
    pub fn new(remote: R, directory: NormalizedPath, public: bool) -> Self {
        Self {
            remote,
            directory,
            public,
        }
    }

    fn authenticate(&self) -> Result<()> {
        let auth = self.remote.auth_check()?;
        if !auth.valid {
            return Err(Error::AuthInvalid {
                scopes: auth.scopes,
            });
        }
        Ok(())
    }

    fn load_local(&self) -> Result<ReplicaStore> {
        ReplicaStore::load_from_local(&self.directory, SYNC_EXTENSION)
    }

    /// Fetch the blob, or `None` when the id is empty or stale.
    fn fetch(&self, blob_id: &str) -> Result<Option<BlobResponse>> {
        if blob_id.trim().is_empty() {
            return Ok(None);
        }
        match self.remote.get(blob_id) {
            Ok(blob) => Ok(Some(blob)),
            Err(Error::RemoteNotFound { id }) => {
                tracing::warn!(id = %id, "Stored blob id no longer resolves");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Compute the sync direction without changing anything.
    pub fn status(&self, blob_id: &str) -> Result<SyncState> {
        self.authenticate()?;
        let local = self.load_local()?;

        let state = match self.fetch(blob_id)? {
            Some(blob) => determine_direction(&local, &blob.replica()?, blob.updated_timestamp()?),
            None => determine_direction(&local, &ReplicaStore::new(), 0),
        };
        tracing::debug!(state = %state, "Computed sync state");
        Ok(state)
    }

    /// Reconcile the local directory with the blob `blob_id`.
    ///
    /// When `blob_id` is empty or no longer exists a new blob seeded with
    /// the local replica is created; its id is returned in the report.
    pub fn sync(&self, blob_id: &str) -> Result<SyncReport> {
        self.authenticate()?;
        let mut local = self.load_local()?;

        let (blob, created) = match self.fetch(blob_id)? {
            Some(blob) => (blob, false),
            None => {
                let created = self.remote.create(&Blob::with_payload(self.public, &local)?)?;
                (self.remote.get(&created.id)?, true)
            }
        };
        let blob_id = blob.id.clone();

        let mut remote = blob.replica()?;
        let state = determine_direction(&local, &remote, blob.updated_timestamp()?);
        tracing::debug!(id = %blob_id, state = %state, "Fetched remote replica");

        let MergeReport {
            to_remote,
            to_local: _,
            conflicts,
        } = merge(&mut local, &mut remote);

        let downloaded = local.dump_locally(&self.directory)?;

        if !to_remote.is_empty() || !blob.has_payload() {
            self.remote
                .update(&blob_id, &Blob::with_payload(self.public, &remote)?)?;
        }

        let report = SyncReport {
            state,
            blob_id,
            created,
            downloaded,
            uploaded: to_remote,
            conflicts,
        };
        tracing::info!(
            downloaded = report.downloaded.len(),
            uploaded = report.uploaded.len(),
            conflicts = report.conflicts.len(),
            "Sync done"
        );
        Ok(report)
    }

    /// Drop `path` from the replica stored in the blob.
    ///
    /// Returns `false` when there is no blob or the path was not in it.
    pub fn remove(&self, blob_id: &str, path: &str) -> Result<bool> {
        self.authenticate()?;

        let Some(blob) = self.fetch(blob_id)? else {
            return Ok(false);
        };
        let mut remote = blob.replica()?;
        if remote.remove(path).is_none() {
            return Ok(false);
        }

        self.remote
            .update(&blob.id, &Blob::with_payload(self.public, &remote)?)?;
        tracing::info!(path = %path, "Removed from remote replica");
        Ok(true)
    }
}
