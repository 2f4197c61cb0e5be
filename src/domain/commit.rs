//! Mirrored commit rows
//!
//! A [`Commit`] is owned by exactly one repository and is created only when
//! its identifier first appears in the remote listing. Its file rows live and
//! die with it. Rows are never mutated after creation except for the sort
//! index, which is rewritten wholesale after every full repository pass.

use crate::domain::repository::RepositoryId;
use crate::domain::user::LocalUserId;
use chrono::{DateTime, Local};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier (content hash) naming a commit within a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommitId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-file change tag as reported upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
}

impl FileStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "added" => Some(Self::Added),
            "modified" => Some(Self::Modified),
            "removed" => Some(Self::Removed),
            "renamed" => Some(Self::Renamed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
            Self::Renamed => "renamed",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mirrored commit row.
///
/// The raw display names are kept even when no local user resolves, so a
/// commit authored outside any linked account still shows who wrote it.
/// Both timestamps are stored in the process-local zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub repository: RepositoryId,
    pub id: CommitId,
    pub author: Option<LocalUserId>,
    pub author_name: String,
    pub authored_at: DateTime<Local>,
    pub committer: Option<LocalUserId>,
    pub committer_name: String,
    pub committed_at: DateTime<Local>,
    pub message: String,
    pub additions: i64,
    pub deletions: i64,
    pub total: i64,
    /// Position in the most recently observed remote ordering, not creation
    /// order. Seeded at ingestion and rewritten after each full pass.
    pub sort_index: i64,
}

/// A file row owned by one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct CommitFile {
    pub filename: String,
    pub status: FileStatus,
    pub additions: i64,
    pub deletions: i64,
    pub changes: i64,
}

/// A commit together with the file rows it owns.
///
/// Staged and flushed as one unit so a commit can never be persisted without
/// its files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct CommitRecord {
    pub commit: Commit,
    pub files: Vec<CommitFile>,
}
