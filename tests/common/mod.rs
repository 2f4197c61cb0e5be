#![allow(dead_code)]

use assert_fs::fixture::{ChildPath, FileWriteStr, PathChild};
use fake::Fake;
use fake::faker::internet::en::Username;
use fake::faker::lorem::en::Words;
use fake::faker::name::en::Name;
use mirrit::domain::commit::CommitId;
use mirrit::domain::repository::{Repository, RepositoryId};
use mirrit::remote::fixture::{RemoteRepository, RemoteSnapshot};
use mirrit::remote::payload::{CommitDetail, RawIdentity, RemoteFile, RemoteStats, Signature};

pub const DATE: &str = "2024-05-01T10:00:00Z";

pub fn repository(id: i64, project: &str, name: &str) -> Repository {
    Repository::new(RepositoryId::from(id), project.to_string(), name.to_string())
}

/// Detail payload with a fake author and one changed file.
///
/// When `remote_account` is given, author and committer carry a complete
/// identity block for that account; otherwise both blocks are absent.
pub fn commit_detail(identifier: &str, remote_account: Option<i64>) -> CommitDetail {
    let author_name: String = Name().fake();
    let message = Words(3..8).fake::<Vec<String>>().join(" ");
    let identity = remote_account.map(|id| {
        RawIdentity::new(
            Some(id),
            Some(Username().fake()),
            Some(format!("https://avatars.example/{id}.png")),
        )
    });

    CommitDetail {
        identifier: CommitId::from(identifier),
        author: identity.clone(),
        committer: identity,
        author_signature: Some(Signature::new(author_name.clone(), DATE.to_string())),
        committer_signature: Some(Signature::new(author_name, DATE.to_string())),
        message,
        stats: RemoteStats::new(3, 1, 4),
        files: vec![RemoteFile::new(
            "README.md".to_string(),
            "modified".to_string(),
            3,
            1,
            4,
        )],
    }
}

pub fn snapshot_with(repository: Repository, commits: Vec<CommitDetail>) -> RemoteSnapshot {
    RemoteSnapshot {
        repositories: vec![RemoteRepository::new(repository, commits)],
    }
}

/// Write a remote snapshot into the temp dir and hand back its path.
pub fn write_snapshot(
    dir: &assert_fs::TempDir,
    name: &str,
    snapshot: &RemoteSnapshot,
) -> ChildPath {
    let file = dir.child(name);
    file.write_str(&serde_json::to_string_pretty(snapshot).unwrap())
        .unwrap();
    file
}
