//! Sync direction

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::replica::ReplicaStore;

/// Relationship between the local replica and the remote blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Upload,
    Download,
    InSync,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncState::Upload => write!(f, "upload"),
            SyncState::Download => write!(f, "download"),
            SyncState::InSync => write!(f, "in_sync"),
        }
    }
}

/// Classify the pair by comparing each local file with its remote copy.
///
/// A remote file without a `ModTimestamp` (stored as `0`) is compared
/// against `remote_updated_at`, the blob's last update time.
///
/// Local changes take priority: any local file missing remotely or newer
/// than its remote copy means `Upload`. Otherwise any remote file missing
/// locally, or newer than its local copy, means `Download`. Matching path
/// sets with equal timestamps are `InSync`.
pub fn determine_direction(
    local: &ReplicaStore,
    remote: &ReplicaStore,
    remote_updated_at: i64,
) -> SyncState {
    let remote_time = |modified: i64| if modified > 0 { modified } else { remote_updated_at };

    let upload = local.files.iter().any(|(path, file)| match remote.get(path) {
        None => true,
        Some(theirs) => file.modified > remote_time(theirs.modified),
    });
    if upload {
        return SyncState::Upload;
    }

    let download = remote.files.iter().any(|(path, theirs)| match local.get(path) {
        None => true,
        Some(file) => remote_time(theirs.modified) > file.modified,
    });
    if download {
        return SyncState::Download;
    }

    SyncState::InSync
}
