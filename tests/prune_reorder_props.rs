use chrono::Local;
use mirrit::domain::commit::{Commit, CommitId, CommitRecord};
use mirrit::domain::repository::{Repository, RepositoryId};
use mirrit::store::memory::MemoryStore;
use proptest::prelude::*;
use std::collections::HashSet;

fn record(repository: RepositoryId, id: &str, sort_index: i64) -> CommitRecord {
    CommitRecord::new(
        Commit {
            repository,
            id: CommitId::from(id),
            author: None,
            author_name: "Alice".to_string(),
            authored_at: Local::now(),
            committer: None,
            committer_name: "Alice".to_string(),
            committed_at: Local::now(),
            message: String::new(),
            additions: 0,
            deletions: 0,
            total: 0,
            sort_index,
        },
        vec![],
    )
}

proptest! {
    /// After a prune and reorder with one observed sequence, the store holds
    /// exactly the observed subset of its previous rows, each at its
    /// observed position.
    #[test]
    fn pruning_and_reordering_converge_on_the_observed_sequence(
        stored in prop::collection::hash_set("[a-f0-9]{8}", 0..40),
        observed in prop::collection::vec("[a-f0-9]{8}", 0..40),
    ) {
        let repo = Repository::new(RepositoryId::from(1), "acme".to_string(), "widget".to_string());
        let mut store = MemoryStore::default();

        for (position, id) in stored.iter().enumerate() {
            store.stage_record(record(repo.id(), id, position as i64));
        }
        store.flush_staged();

        let observed_ids: Vec<CommitId> = observed.iter().map(|id| CommitId::from(id.as_str())).collect();
        let pruned = store.prune_absent(&repo, &observed_ids);
        store.rewrite_order(&repo, &observed_ids);

        let observed_set: HashSet<&str> = observed.iter().map(String::as_str).collect();
        let surviving: usize = stored.iter().filter(|id| observed_set.contains(id.as_str())).count();

        prop_assert_eq!(store.commit_count(repo.id()), surviving);
        prop_assert_eq!(pruned as usize, stored.len() - surviving);

        for (position, id) in observed_ids.iter().enumerate() {
            if let Some(row) = store.commit(repo.id(), id) {
                // last occurrence wins when an identifier repeats
                let last = observed_ids.iter().rposition(|other| other == id).unwrap();
                prop_assert_eq!(row.commit.sort_index, last as i64);
                prop_assert!(position <= last);
            }
        }
    }
}
