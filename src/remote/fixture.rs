//! Snapshot-backed remote
//!
//! A [`RemoteSnapshot`] is a serialized picture of the remote side:
//! repositories with their full commit details in listing order (newest
//! first). [`FixtureRemote`] serves it through the feed and repository source
//! contracts, which is all the synchronizer ever sees of a remote.

use crate::domain::commit::CommitId;
use crate::domain::repository::Repository;
use crate::remote::feed::RemoteCommitFeed;
use crate::remote::payload::{CommitDetail, CommitSummary};
use crate::store::contracts::RepositorySource;
use crate::sync::error::SyncError;
use anyhow::Context;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Serialized picture of the remote side of the mirror.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteSnapshot {
    pub repositories: Vec<RemoteRepository>,
}

/// One remote repository and its history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, new)]
pub struct RemoteRepository {
    pub repository: Repository,
    pub commits: Vec<CommitDetail>,
}

/// Feed and repository source backed by a [`RemoteSnapshot`].
#[derive(Debug, Clone)]
pub struct FixtureRemote {
    snapshot: Arc<RemoteSnapshot>,
}

impl FixtureRemote {
    pub fn new(snapshot: RemoteSnapshot) -> Self {
        FixtureRemote {
            snapshot: Arc::new(snapshot),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .context(format!("Unable to read remote snapshot {}", path.display()))?;
        let snapshot = serde_json::from_str(&raw)
            .context(format!("Invalid remote snapshot {}", path.display()))?;
        Ok(Self::new(snapshot))
    }

    fn repository(&self, full_name: &str) -> Result<&RemoteRepository, SyncError> {
        self.snapshot
            .repositories
            .iter()
            .find(|entry| entry.repository.full_name() == full_name)
            .ok_or_else(|| SyncError::not_found(format!("repository `{full_name}`")))
    }
}

impl RepositorySource for FixtureRemote {
    async fn list(&self) -> Result<Vec<Repository>, SyncError> {
        let mut repositories: Vec<Repository> = self
            .snapshot
            .repositories
            .iter()
            .map(|entry| entry.repository.clone())
            .collect();

        // the run order contract: by project, then by name
        repositories.sort_by(|a, b| {
            a.project()
                .cmp(b.project())
                .then_with(|| a.name().cmp(b.name()))
        });

        Ok(repositories)
    }
}

impl RemoteCommitFeed for FixtureRemote {
    async fn list_page(
        &self,
        repository: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<CommitSummary>, SyncError> {
        let entry = self.repository(repository)?;
        let start = page.saturating_sub(1) * per_page;

        Ok(entry
            .commits
            .iter()
            .skip(start)
            .take(per_page)
            .map(CommitDetail::summary)
            .collect())
    }

    async fn fetch_detail(
        &self,
        repository: &str,
        identifier: &CommitId,
    ) -> Result<CommitDetail, SyncError> {
        let entry = self.repository(repository)?;

        entry
            .commits
            .iter()
            .find(|detail| &detail.identifier == identifier)
            .cloned()
            .ok_or_else(|| {
                SyncError::not_found(format!("commit `{identifier}` in `{repository}`"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::RepositoryId;

    fn snapshot() -> RemoteSnapshot {
        let repository = |id: i64, project: &str, name: &str| {
            RemoteRepository::new(
                Repository::new(RepositoryId::from(id), project.to_string(), name.to_string()),
                vec![],
            )
        };

        RemoteSnapshot {
            repositories: vec![
                repository(1, "zoo", "ant"),
                repository(2, "acme", "widget"),
                repository(3, "acme", "anvil"),
            ],
        }
    }

    #[tokio::test]
    async fn lists_repositories_by_project_then_name() {
        let remote = FixtureRemote::new(snapshot());

        let names: Vec<String> = remote
            .list()
            .await
            .unwrap()
            .iter()
            .map(Repository::full_name)
            .collect();

        pretty_assertions::assert_eq!(names, vec!["acme/anvil", "acme/widget", "zoo/ant"]);
    }

    #[tokio::test]
    async fn detail_fetch_for_an_unknown_commit_is_not_found() {
        let remote = FixtureRemote::new(snapshot());

        let err = remote
            .fetch_detail("acme/widget", &CommitId::from("feed"))
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::NotFound { .. }));
    }
}
