//! Remote commit listing contract
//!
//! The feed is the only window onto remote history: a paginated listing of
//! commit summaries plus an on-demand detail fetch. [`PageCursor`] drives the
//! listing lazily, one page per call, so a repository's history is never
//! held in memory at once.

use crate::domain::commit::CommitId;
use crate::remote::payload::{CommitDetail, CommitSummary};
use crate::sync::error::SyncError;

/// Page size the remote listing is driven at.
pub const PAGE_SIZE: usize = 100;

/// Paginated listing of commit summaries and on-demand fetch of full detail.
///
/// Pages are 1-based and returned newest first, the order the remote api
/// lists history in.
pub trait RemoteCommitFeed {
    async fn list_page(
        &self,
        repository: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<CommitSummary>, SyncError>;

    async fn fetch_detail(
        &self,
        repository: &str,
        identifier: &CommitId,
    ) -> Result<CommitDetail, SyncError>;
}

/// Lazy cursor over one repository's remote commit listing.
///
/// An empty page or a short page (fewer entries than the page size) marks the
/// end of the listing; after that every call returns `None`.
pub struct PageCursor<'f, F: RemoteCommitFeed> {
    feed: &'f F,
    repository: String,
    per_page: usize,
    next_page: usize,
    exhausted: bool,
}

impl<'f, F: RemoteCommitFeed> PageCursor<'f, F> {
    pub fn new(feed: &'f F, repository: impl Into<String>, per_page: usize) -> Self {
        PageCursor {
            feed,
            repository: repository.into(),
            per_page,
            next_page: 1,
            exhausted: false,
        }
    }

    /// The next page of summaries, or `None` once the listing is exhausted.
    pub async fn next(&mut self) -> Result<Option<Vec<CommitSummary>>, SyncError> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self
            .feed
            .list_page(&self.repository, self.next_page, self.per_page)
            .await?;
        self.next_page += 1;

        if page.len() < self.per_page {
            self.exhausted = true;
        }

        if page.is_empty() {
            return Ok(None);
        }

        Ok(Some(page))
    }
}
