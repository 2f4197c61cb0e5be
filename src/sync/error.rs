use crate::domain::commit::CommitId;
use thiserror::Error;

/// Failures that abort a synchronization run.
///
/// None of these are caught or retried inside the synchronizer: the first
/// error aborts the in-progress repository pass and the whole run with it.
/// Records flushed before the failure stay persisted; staged records are
/// lost and rediscovered on the next successful run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network-level failure reaching the remote api.
    #[error("failed to reach the remote api: {message}")]
    Transport { message: String },

    /// Repository or commit missing upstream.
    #[error("{subject} was not found upstream")]
    NotFound { subject: String },

    /// The remote api throttled the request.
    #[error("rate limited by the remote api: {message}")]
    RateLimited { message: String },

    /// A commit or file payload missing fields it is required to carry.
    #[error("malformed payload for commit `{identifier}`: {reason}")]
    MalformedPayload { identifier: String, reason: String },

    /// The store failed to durably persist staged records.
    #[error("failed to persist staged commits: {message}")]
    Persistence { message: String },
}

impl SyncError {
    pub fn malformed(identifier: &CommitId, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(subject: impl Into<String>) -> Self {
        Self::NotFound {
            subject: subject.into(),
        }
    }
}
