//! Decoded payloads of the remote commit api
//!
//! These are the shapes the feed hands to ingestion: one [`CommitSummary`]
//! per listing entry and one [`CommitDetail`] per detail fetch. Identity
//! blocks and signature sub-records are optional at this level; ingestion
//! applies the strict rules (a missing signature or a partially populated
//! identity block is an error, a wholly absent identity block is not).

use crate::domain::commit::CommitId;
use crate::domain::user::RemoteIdentity;
use chrono::{DateTime, Local};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// One entry of a page of the remote commit listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct CommitSummary {
    pub identifier: CommitId,
}

/// Remote account block attached to a commit.
///
/// The remote may omit the block entirely (identity deleted upstream, or a
/// commit authored outside any linked account). A block that is present but
/// missing individual fields is malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct RawIdentity {
    pub remote_id: Option<i64>,
    pub login: Option<String>,
    pub avatar_url: Option<String>,
}

impl RawIdentity {
    /// All-or-nothing: a block missing any of its fields is rejected.
    pub fn require_complete(&self) -> Result<RemoteIdentity, String> {
        match (self.remote_id, &self.login, &self.avatar_url) {
            (Some(remote_id), Some(login), Some(avatar_url)) => Ok(RemoteIdentity::new(
                remote_id,
                login.clone(),
                avatar_url.clone(),
            )),
            _ => Err("identity block is missing one of id, login or avatar url".to_string()),
        }
    }
}

/// Name and timestamp sub-record of the underlying commit object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Signature {
    pub name: String,
    /// RFC 3339 timestamp as sent by the remote.
    pub date: String,
}

impl Signature {
    /// Parse the remote timestamp and convert it to the process-local zone.
    pub fn local_date(&self) -> Result<DateTime<Local>, chrono::ParseError> {
        Ok(DateTime::parse_from_rfc3339(&self.date)?.with_timezone(&Local))
    }
}

/// Whole-commit line counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct RemoteStats {
    pub additions: i64,
    pub deletions: i64,
    pub total: i64,
}

/// One file entry of a commit detail payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct RemoteFile {
    pub filename: String,
    pub status: String,
    pub additions: i64,
    pub deletions: i64,
    pub changes: i64,
}

/// Full detail payload for one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    pub identifier: CommitId,
    #[serde(default)]
    pub author: Option<RawIdentity>,
    #[serde(default)]
    pub committer: Option<RawIdentity>,
    #[serde(default)]
    pub author_signature: Option<Signature>,
    #[serde(default)]
    pub committer_signature: Option<Signature>,
    pub message: String,
    pub stats: RemoteStats,
    pub files: Vec<RemoteFile>,
}

impl CommitDetail {
    /// The listing entry this detail corresponds to.
    pub fn summary(&self) -> CommitSummary {
        CommitSummary::new(self.identifier.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use rstest::*;

    fn complete_identity() -> RawIdentity {
        RawIdentity::new(
            Some(42),
            Some("octocat".to_string()),
            Some("https://example.test/octocat.png".to_string()),
        )
    }

    #[rstest]
    fn accepts_a_complete_identity_block() {
        let identity = complete_identity().require_complete().unwrap();

        pretty_assertions::assert_eq!(identity.remote_id(), 42);
        pretty_assertions::assert_eq!(identity.login(), "octocat");
        pretty_assertions::assert_eq!(identity.avatar_url(), "https://example.test/octocat.png");
    }

    #[rstest]
    #[case(RawIdentity::new(None, Some("octocat".to_string()), Some("url".to_string())))]
    #[case(RawIdentity::new(Some(42), None, Some("url".to_string())))]
    #[case(RawIdentity::new(Some(42), Some("octocat".to_string()), None))]
    #[case(RawIdentity::default())]
    fn rejects_partial_identity_blocks(#[case] block: RawIdentity) {
        assert!(block.require_complete().is_err());
    }

    #[rstest]
    fn converts_signature_dates_to_the_local_zone() {
        let signature = Signature::new("Alice".to_string(), "2024-05-01T10:30:00+02:00".to_string());

        let parsed = signature.local_date().unwrap();
        let original = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 10, 30, 0)
            .unwrap();

        // the instant is preserved regardless of the zone it is rendered in
        pretty_assertions::assert_eq!(parsed, original);
    }

    #[rstest]
    #[case("not-a-date")]
    #[case("2024-13-40T99:00:00Z")]
    #[case("")]
    fn rejects_unparseable_signature_dates(#[case] raw: &str) {
        let signature = Signature::new("Alice".to_string(), raw.to_string());
        assert!(signature.local_date().is_err());
    }
}
