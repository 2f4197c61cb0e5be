//! Commit history synchronization
//!
//! One run mirrors every registered repository against the remote listing,
//! in a fixed order, one repository at a time:
//!
//! 1. Page through the remote listing (newest first), accumulating every
//!    identifier seen into the observed sequence.
//! 2. Identifiers unknown to the existence snapshot are fetched in full and
//!    staged for persistence; known ones are skipped before the expensive
//!    detail fetch.
//! 3. The staging buffer is flushed after every [`FLUSH_INTERVAL`] observed
//!    commits, bounding memory and transaction size on large repositories,
//!    and once more unconditionally after the last page.
//! 4. With the listing drained, commits absent from the observed sequence
//!    are pruned and the sort order of the survivors is rewritten to match
//!    the remote ordering.
//!
//! Pruning and reordering require the complete observed sequence: acting on
//! a partial sequence would delete or misplace commits still pending
//! discovery on a later page, so both steps are skipped whenever an earlier
//! step failed.
//!
//! Execution is strictly sequential. The run assumes single-writer
//! exclusivity per repository; concurrent runs over the same repository can
//! race on existence checks and on the final prune and reorder steps, and
//! must be prevented by the caller.

use crate::domain::commit::{Commit, CommitFile, CommitId, CommitRecord, FileStatus};
use crate::domain::repository::Repository;
use crate::domain::user::LocalUserId;
use crate::remote::feed::{PAGE_SIZE, PageCursor, RemoteCommitFeed};
use crate::remote::payload::{RawIdentity, Signature};
use crate::store::contracts::{
    CommitStore, OrderReconciler, RepositorySource, UnreachablePruner, UserResolver,
};
use crate::sync::error::SyncError;
use crate::sync::existence::ExistenceIndex;
use chrono::{DateTime, Local};
use derive_new::new;
use tracing::{debug, info, trace};

/// Commits observed between flushes of the staging buffer.
const FLUSH_INTERVAL: usize = 1_000;

/// Outcome of one full synchronization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub repositories: Vec<RepositoryReport>,
}

/// Outcome of one repository's pass.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RepositoryReport {
    pub repository: Repository,
    pub observed: usize,
    pub created: usize,
    pub pruned: u64,
}

/// Drives the mirror: feed and existence snapshot in, staged records and a
/// reconciled order out.
#[derive(new)]
pub struct CommitSynchronizer<Src, Feed, Users, Store, Pruner, Reconciler> {
    source: Src,
    feed: Feed,
    users: Users,
    store: Store,
    pruner: Pruner,
    reconciler: Reconciler,
}

impl<Src, Feed, Users, Store, Pruner, Reconciler>
    CommitSynchronizer<Src, Feed, Users, Store, Pruner, Reconciler>
where
    Src: RepositorySource,
    Feed: RemoteCommitFeed,
    Users: UserResolver,
    Store: CommitStore,
    Pruner: UnreachablePruner,
    Reconciler: OrderReconciler,
{
    /// Mirror every repository of the ordered set.
    ///
    /// The first failure aborts the run; repositories later in the order are
    /// not attempted.
    pub async fn synchronize(&mut self) -> Result<RunReport, SyncError> {
        let repositories = self.source.list().await?;
        let mut index = ExistenceIndex::new();
        let mut report = RunReport::default();

        for repository in &repositories {
            let outcome = self.synchronize_repository(repository, &mut index).await?;
            report.repositories.push(outcome);
        }

        Ok(report)
    }

    /// One full pass over a repository's remote listing.
    pub async fn synchronize_repository(
        &mut self,
        repository: &Repository,
        index: &mut ExistenceIndex,
    ) -> Result<RepositoryReport, SyncError> {
        info!(repository = %repository.full_name(), "synchronizing repository");

        let Self {
            feed,
            users,
            store,
            pruner,
            reconciler,
            ..
        } = self;

        let mut cursor = PageCursor::new(&*feed, repository.full_name(), PAGE_SIZE);
        let mut observed: Vec<CommitId> = Vec::new();
        let mut created = 0usize;
        let mut seq = 0usize;

        while let Some(page) = cursor.next().await? {
            for summary in page {
                observed.push(summary.identifier.clone());

                if !index.exists(&*store, repository, &summary.identifier).await? {
                    synchronize_commit(&*feed, users, store, repository, &summary.identifier, seq)
                        .await?;
                    created += 1;
                }

                seq += 1;
                // cadence follows commits observed, known ones included
                if seq % FLUSH_INTERVAL == 0 {
                    debug!(repository = %repository.full_name(), seq, "flushing staged commits");
                    store.flush().await?;
                }
            }
        }

        // the final flush is unconditional, even when nothing was staged
        store.flush().await?;

        let pruned = pruner.prune(repository, &observed).await?;
        reconciler.reorder(repository, &observed).await?;

        debug!(
            repository = %repository.full_name(),
            observed = observed.len(),
            created,
            pruned,
            "repository pass complete"
        );

        Ok(RepositoryReport::new(
            repository.clone(),
            observed.len(),
            created,
            pruned,
        ))
    }
}

/// Fetch one commit's full detail and stage its aggregate for persistence.
///
/// The sort index is seeded with `seq`; the reconciler rewrites it once the
/// whole listing has been observed.
async fn synchronize_commit<Feed, Users, Store>(
    feed: &Feed,
    users: &mut Users,
    store: &mut Store,
    repository: &Repository,
    identifier: &CommitId,
    seq: usize,
) -> Result<(), SyncError>
where
    Feed: RemoteCommitFeed,
    Users: UserResolver,
    Store: CommitStore,
{
    let detail = feed
        .fetch_detail(&repository.full_name(), identifier)
        .await?;

    let author = resolve_identity(users, detail.author.as_ref(), identifier).await?;
    let committer = resolve_identity(users, detail.committer.as_ref(), identifier).await?;

    let author_signature = detail
        .author_signature
        .as_ref()
        .ok_or_else(|| SyncError::malformed(identifier, "author signature is missing"))?;
    let committer_signature = detail
        .committer_signature
        .as_ref()
        .ok_or_else(|| SyncError::malformed(identifier, "committer signature is missing"))?;

    let commit = Commit {
        repository: repository.id(),
        id: identifier.clone(),
        author,
        author_name: author_signature.name.clone(),
        authored_at: parse_signature_date(author_signature, identifier)?,
        committer,
        committer_name: committer_signature.name.clone(),
        committed_at: parse_signature_date(committer_signature, identifier)?,
        message: detail.message.clone(),
        additions: detail.stats.additions,
        deletions: detail.stats.deletions,
        total: detail.stats.total,
        sort_index: seq as i64,
    };

    let files = detail
        .files
        .iter()
        .map(|file| {
            let status = FileStatus::parse(&file.status).ok_or_else(|| {
                SyncError::malformed(identifier, format!("unknown file status `{}`", file.status))
            })?;
            Ok(CommitFile::new(
                file.filename.clone(),
                status,
                file.additions,
                file.deletions,
                file.changes,
            ))
        })
        .collect::<Result<Vec<_>, SyncError>>()?;

    trace!(commit = %identifier, files = files.len(), "staging commit");
    store.stage(CommitRecord::new(commit, files)).await;

    Ok(())
}

/// Resolve an identity block to a local user, if the block is present.
///
/// The raw display name and timestamp never depend on this; they come from
/// the signature sub-record either way.
async fn resolve_identity<Users: UserResolver>(
    users: &mut Users,
    block: Option<&RawIdentity>,
    identifier: &CommitId,
) -> Result<Option<LocalUserId>, SyncError> {
    match block {
        Some(raw) => {
            let identity = raw
                .require_complete()
                .map_err(|reason| SyncError::malformed(identifier, reason))?;
            Ok(Some(users.resolve(&identity).await?))
        }
        None => Ok(None),
    }
}

fn parse_signature_date(
    signature: &Signature,
    identifier: &CommitId,
) -> Result<DateTime<Local>, SyncError> {
    signature.local_date().map_err(|err| {
        SyncError::malformed(
            identifier,
            format!("bad timestamp `{}`: {err}", signature.date),
        )
    })
}
