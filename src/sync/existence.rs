use crate::domain::commit::CommitId;
use crate::domain::repository::{Repository, RepositoryId};
use crate::store::contracts::CommitStore;
use crate::sync::error::SyncError;
use std::collections::HashMap;

/// Per-run snapshot of every known commit identifier and its stored order.
///
/// The snapshot is loaded lazily on the first lookup and reused for the
/// remainder of the run; it is never refreshed mid-run. Commits persisted
/// during the run do not appear in later lookups, which is safe because each
/// identifier is checked exactly once, before it is persisted.
#[derive(Debug, Default)]
pub struct ExistenceIndex {
    snapshot: Option<HashMap<RepositoryId, HashMap<CommitId, i64>>>,
}

impl ExistenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `identifier` was already stored for `repository` when the
    /// snapshot was taken.
    pub async fn exists<S: CommitStore>(
        &mut self,
        store: &S,
        repository: &Repository,
        identifier: &CommitId,
    ) -> Result<bool, SyncError> {
        if self.snapshot.is_none() {
            self.snapshot = Some(store.load_index().await?);
        }

        let known = self
            .snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.get(&repository.id()));

        Ok(known.is_some_and(|commits| commits.contains_key(identifier)))
    }
}
