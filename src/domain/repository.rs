use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier of a locally registered repository.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct RepositoryId(i64);

impl RepositoryId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for RepositoryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A repository whose remote history is mirrored locally.
///
/// Immutable as far as synchronization is concerned; the ordering of
/// repositories for a run is supplied by the repository source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Repository {
    id: RepositoryId,
    project: String,
    name: String,
}

impl Repository {
    pub fn id(&self) -> RepositoryId {
        self.id
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `<project>/<name>` form the remote api addresses repositories by.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.project, self.name)
    }
}
