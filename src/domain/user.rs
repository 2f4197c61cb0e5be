use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a local user row linked to a remote account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalUserId(i64);

impl LocalUserId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for LocalUserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for LocalUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fully populated remote identity attached to a commit.
///
/// Identity blocks are all-or-nothing: partial blocks are rejected during
/// ingestion, so every value here is guaranteed present.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RemoteIdentity {
    remote_id: i64,
    login: String,
    avatar_url: String,
}

impl RemoteIdentity {
    pub fn remote_id(&self) -> i64 {
        self.remote_id
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }
}
