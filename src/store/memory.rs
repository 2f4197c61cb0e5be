//! Serializable in-memory datastore
//!
//! [`MemoryStore`] keeps every mirrored row in plain maps and can be saved
//! to and loaded from a JSON file between runs. [`SharedStore`] is the
//! cloneable handle that lets one store serve all of the synchronizer's
//! storage seams at once.

use crate::domain::commit::{CommitId, CommitRecord};
use crate::domain::repository::{Repository, RepositoryId};
use crate::domain::user::{LocalUserId, RemoteIdentity};
use crate::store::contracts::{CommitStore, OrderReconciler, UnreachablePruner, UserResolver};
use crate::sync::error::SyncError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A local user row created for a remote account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalUser {
    pub id: LocalUserId,
    pub remote_id: i64,
    pub login: String,
    pub avatar_url: String,
}

/// In-memory datastore for mirrored repositories, commits and users.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    /// Repository rows, refreshed whenever a pass completes for them.
    repositories: BTreeMap<RepositoryId, Repository>,
    /// Flushed commit rows, keyed by repository then identifier.
    commits: BTreeMap<RepositoryId, BTreeMap<CommitId, CommitRecord>>,
    /// Local user rows keyed by remote numeric id.
    users: BTreeMap<i64, LocalUser>,
    next_user: i64,
    #[serde(skip)]
    staged: Vec<CommitRecord>,
    #[serde(skip)]
    flushes: usize,
}

impl MemoryStore {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .context(format!("Unable to read datastore {}", path.display()))?;
        serde_json::from_str(&raw).context(format!("Invalid datastore {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(self).context("Unable to serialize datastore")?;
        std::fs::write(path, raw)
            .context(format!("Unable to write datastore {}", path.display()))
    }

    pub fn stage_record(&mut self, record: CommitRecord) {
        self.staged.push(record);
    }

    pub fn flush_staged(&mut self) {
        self.flushes += 1;
        for record in self.staged.drain(..) {
            self.commits
                .entry(record.commit.repository)
                .or_default()
                .insert(record.commit.id.clone(), record);
        }
    }

    pub fn existence_snapshot(&self) -> HashMap<RepositoryId, HashMap<CommitId, i64>> {
        self.commits
            .iter()
            .map(|(repository, commits)| {
                let known = commits
                    .iter()
                    .map(|(id, record)| (id.clone(), record.commit.sort_index))
                    .collect();
                (*repository, known)
            })
            .collect()
    }

    pub fn resolve_identity(&mut self, identity: &RemoteIdentity) -> LocalUserId {
        if let Some(user) = self.users.get(&identity.remote_id()) {
            return user.id;
        }

        self.next_user += 1;
        let id = LocalUserId::from(self.next_user);
        self.users.insert(
            identity.remote_id(),
            LocalUser {
                id,
                remote_id: identity.remote_id(),
                login: identity.login().to_string(),
                avatar_url: identity.avatar_url().to_string(),
            },
        );
        id
    }

    pub fn prune_absent(&mut self, repository: &Repository, observed: &[CommitId]) -> u64 {
        self.touch_repository(repository);

        let Some(commits) = self.commits.get_mut(&repository.id()) else {
            return 0;
        };

        let reachable: HashSet<&CommitId> = observed.iter().collect();
        let before = commits.len();
        commits.retain(|id, _| reachable.contains(id));

        (before - commits.len()) as u64
    }

    pub fn rewrite_order(&mut self, repository: &Repository, observed: &[CommitId]) {
        self.touch_repository(repository);

        let Some(commits) = self.commits.get_mut(&repository.id()) else {
            return;
        };

        for (position, id) in observed.iter().enumerate() {
            if let Some(record) = commits.get_mut(id) {
                record.commit.sort_index = position as i64;
            }
        }
    }

    fn touch_repository(&mut self, repository: &Repository) {
        self.repositories
            .insert(repository.id(), repository.clone());
    }

    pub fn repositories(&self) -> impl Iterator<Item = &Repository> {
        self.repositories.values()
    }

    pub fn commit(&self, repository: RepositoryId, id: &CommitId) -> Option<&CommitRecord> {
        self.commits.get(&repository)?.get(id)
    }

    pub fn commit_count(&self, repository: RepositoryId) -> usize {
        self.commits
            .get(&repository)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }

    /// Commit rows of one repository in authoritative sort order.
    pub fn sorted_commits(&self, repository: RepositoryId) -> Vec<&CommitRecord> {
        let mut records: Vec<&CommitRecord> = self
            .commits
            .get(&repository)
            .map(|commits| commits.values().collect())
            .unwrap_or_default();
        records.sort_by_key(|record| record.commit.sort_index);
        records
    }

    pub fn user(&self, remote_id: i64) -> Option<&LocalUser> {
        self.users.get(&remote_id)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    /// How many times the staging buffer has been flushed.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

/// Cloneable handle sharing one [`MemoryStore`] across the storage seams.
#[derive(Debug, Clone, Default)]
pub struct SharedStore(Arc<Mutex<MemoryStore>>);

impl SharedStore {
    pub fn new(store: MemoryStore) -> Self {
        SharedStore(Arc::new(Mutex::new(store)))
    }

    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, MemoryStore> {
        self.0.lock().await
    }
}

impl CommitStore for SharedStore {
    async fn stage(&mut self, record: CommitRecord) {
        self.0.lock().await.stage_record(record);
    }

    async fn flush(&mut self) -> Result<(), SyncError> {
        self.0.lock().await.flush_staged();
        Ok(())
    }

    async fn load_index(
        &self,
    ) -> Result<HashMap<RepositoryId, HashMap<CommitId, i64>>, SyncError> {
        Ok(self.0.lock().await.existence_snapshot())
    }
}

impl UserResolver for SharedStore {
    async fn resolve(&mut self, identity: &RemoteIdentity) -> Result<LocalUserId, SyncError> {
        Ok(self.0.lock().await.resolve_identity(identity))
    }
}

impl UnreachablePruner for SharedStore {
    async fn prune(
        &mut self,
        repository: &Repository,
        observed: &[CommitId],
    ) -> Result<u64, SyncError> {
        Ok(self.0.lock().await.prune_absent(repository, observed))
    }
}

impl OrderReconciler for SharedStore {
    async fn reorder(
        &mut self,
        repository: &Repository,
        observed: &[CommitId],
    ) -> Result<(), SyncError> {
        self.0.lock().await.rewrite_order(repository, observed);
        Ok(())
    }
}
