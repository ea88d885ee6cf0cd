//! Last-write-wins reconciliation of two replicas

use crate::replica::ReplicaStore;

/// What a merge changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Paths copied from local onto remote
    pub to_remote: Vec<String>,
    /// Paths copied from remote onto local
    pub to_local: Vec<String>,
    /// Paths with equal timestamps but different content, left untouched
    pub conflicts: Vec<String>,
}

impl MergeReport {
    pub fn is_noop(&self) -> bool {
        self.to_remote.is_empty() && self.to_local.is_empty()
    }
}

enum Winner {
    Source,
    Target,
    Tie,
    Conflict,
}

fn winner(source: &crate::ReplicaFile, target: &crate::ReplicaFile) -> Winner {
    match source.modified.cmp(&target.modified) {
        std::cmp::Ordering::Greater => Winner::Source,
        std::cmp::Ordering::Less => Winner::Target,
        std::cmp::Ordering::Equal if source.content == target.content => Winner::Tie,
        std::cmp::Ordering::Equal => Winner::Conflict,
    }
}

/// Merge two replicas in place.
///
/// A path missing on one side is copied from the other; a path present on
/// both sides takes the file with the strictly newer timestamp. After the
/// merge both stores hold the same paths with identical files, except for
/// paths reported in [`MergeReport::conflicts`].
///
/// Running it again on a merged pair changes nothing.
pub fn merge(local: &mut ReplicaStore, remote: &mut ReplicaStore) -> MergeReport {
    let mut report = MergeReport::default();

    for (path, file) in &local.files {
        match remote.files.get(path) {
            None => {
                tracing::debug!(path = %path, "Local only, copying to remote");
                remote.files.insert(path.clone(), file.clone());
                report.to_remote.push(path.clone());
            }
            Some(other) => match winner(file, other) {
                Winner::Source => {
                    tracing::debug!(path = %path, "Local is newer");
                    remote.files.insert(path.clone(), file.clone());
                    report.to_remote.push(path.clone());
                }
                Winner::Conflict => {
                    tracing::warn!(path = %path, "Same timestamp, different content");
                    report.conflicts.push(path.clone());
                }
                Winner::Target | Winner::Tie => {}
            },
        }
    }

    for (path, file) in &remote.files {
        match local.files.get(path) {
            None => {
                tracing::debug!(path = %path, "Remote only, copying to local");
                report.to_local.push(path.clone());
            }
            Some(other) => {
                if let Winner::Source = winner(file, other) {
                    tracing::debug!(path = %path, "Remote is newer");
                    report.to_local.push(path.clone());
                }
            }
        }
    }
    for path in &report.to_local {
        if let Some(file) = remote.files.get(path) {
            local.files.insert(path.clone(), file.clone());
        }
    }

    report
}
