//! Datastore seams
//!
//! The synchronizer never touches storage directly; everything goes through
//! these contracts. Staging buffers records in memory, flushing persists the
//! whole buffer, and pruning and reordering always receive the complete
//! observed sequence of one full repository pass.

use crate::domain::commit::{CommitId, CommitRecord};
use crate::domain::repository::{Repository, RepositoryId};
use crate::domain::user::{LocalUserId, RemoteIdentity};
use crate::sync::error::SyncError;
use std::collections::HashMap;

/// The ordered set of repositories to mirror.
///
/// Ordering is by project then name and is stable across calls within a run.
pub trait RepositorySource {
    async fn list(&self) -> Result<Vec<Repository>, SyncError>;
}

/// Buffered persistence of newly constructed commit aggregates.
pub trait CommitStore {
    /// Buffer a record. Never flushes by itself.
    async fn stage(&mut self, record: CommitRecord);

    /// Durably persist everything staged. Safe to call with an empty buffer.
    async fn flush(&mut self) -> Result<(), SyncError>;

    /// Snapshot of every known (repository, identifier, sort index) triple.
    async fn load_index(
        &self,
    ) -> Result<HashMap<RepositoryId, HashMap<CommitId, i64>>, SyncError>;
}

/// Maps a remote identity to a local user row, creating one if needed.
pub trait UserResolver {
    async fn resolve(&mut self, identity: &RemoteIdentity) -> Result<LocalUserId, SyncError>;
}

/// Deletes local commits whose identifier is absent from the latest observed
/// sequence.
pub trait UnreachablePruner {
    /// Returns how many rows were deleted.
    async fn prune(
        &mut self,
        repository: &Repository,
        observed: &[CommitId],
    ) -> Result<u64, SyncError>;
}

/// Rewrites the authoritative sort order of a repository's commits.
pub trait OrderReconciler {
    /// Assigns sort index = 0-based position within `observed` to every
    /// matching local commit.
    async fn reorder(
        &mut self,
        repository: &Repository,
        observed: &[CommitId],
    ) -> Result<(), SyncError>;
}
