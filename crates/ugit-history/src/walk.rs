use std::collections::{HashSet, VecDeque};

use ugit_hash::ObjectId;
use ugit_object::{EntryKind, ObjectType, Tree};
use ugit_repo::Repo;

use crate::HistoryError;

/// Lazily yields every commit reachable from `seeds` via `parents` edges,
/// each exactly once. A popped commit's first parent is pushed to the
/// front of the work list (so linear history walks in order); remaining
/// parents are pushed to the back to guarantee full reachability.
pub struct CommitWalk<'a> {
    repo: &'a Repo,
    queue: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
}

pub fn iter_commits_and_parents<'a>(
    repo: &'a Repo,
    seeds: impl IntoIterator<Item = ObjectId>,
) -> CommitWalk<'a> {
    CommitWalk {
        repo,
        queue: seeds.into_iter().collect(),
        visited: HashSet::new(),
    }
}

impl Iterator for CommitWalk<'_> {
    type Item = Result<ObjectId, HistoryError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let oid = self.queue.pop_front()?;
            if !self.visited.insert(oid) {
                continue;
            }

            let commit = match self.repo.get_commit(&oid) {
                Ok(c) => c,
                Err(e) => return Some(Err(e.into())),
            };

            if let Some(&first) = commit.parents.first() {
                self.queue.push_front(first);
            }
            for &parent in commit.parents.iter().skip(1) {
                self.queue.push_back(parent);
            }

            return Some(Ok(oid));
        }
    }
}

/// Every object OID reachable from `seeds`: each commit, its tree, and the
/// transitive closure of subtrees and blobs.
pub fn iter_objects_in_commits(
    repo: &Repo,
    seeds: impl IntoIterator<Item = ObjectId>,
) -> Result<Vec<ObjectId>, HistoryError> {
    let mut visited = HashSet::new();
    let mut out = Vec::new();

    for oid in iter_commits_and_parents(repo, seeds) {
        let oid = oid?;
        out.push(oid);
        let commit = repo.get_commit(&oid)?;
        walk_tree_objects(repo, commit.tree, &mut visited, &mut out)?;
    }
    Ok(out)
}

fn walk_tree_objects(
    repo: &Repo,
    tree_oid: ObjectId,
    visited: &mut HashSet<ObjectId>,
    out: &mut Vec<ObjectId>,
) -> Result<(), HistoryError> {
    if !visited.insert(tree_oid) {
        return Ok(());
    }
    out.push(tree_oid);

    let content = repo.store().get_object(&tree_oid, Some(ObjectType::Tree))?;
    let tree = Tree::parse(&content)?;

    for entry in tree.iter() {
        match entry.kind {
            EntryKind::Tree => walk_tree_objects(repo, entry.oid, visited, out)?,
            EntryKind::Blob => {
                if visited.insert(entry.oid) {
                    out.push(entry.oid);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn walk_yields_each_commit_once() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"1\n").unwrap();
        let c1 = repo.commit("first").unwrap();
        fs::write(dir.path().join("a.txt"), b"2\n").unwrap();
        let c2 = repo.commit("second").unwrap();

        let walked: Vec<ObjectId> = iter_commits_and_parents(&repo, [c2]).collect::<Result<_, _>>().unwrap();
        assert_eq!(walked, vec![c2, c1]);
    }

    #[test]
    fn reachability_closure_includes_tree_and_blob() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"hello\n").unwrap();
        let c1 = repo.commit("first").unwrap();
        let commit = repo.get_commit(&c1).unwrap();

        let objects = iter_objects_in_commits(&repo, [c1]).unwrap();
        assert!(objects.contains(&c1));
        assert!(objects.contains(&commit.tree));
        assert_eq!(objects.len(), 3); // commit, tree, blob
    }

    #[test]
    fn merge_commit_reaches_both_parents() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"1\n").unwrap();
        let c1 = repo.commit("first").unwrap();

        let merge_head = ugit_ref::RefName::new("MERGE_HEAD").unwrap();
        repo.refs().update_ref(&merge_head, &ugit_ref::RefValue::Direct(c1), false).unwrap();
        let c2 = repo.commit("merge").unwrap();

        let walked: Vec<ObjectId> = iter_commits_and_parents(&repo, [c2]).collect::<Result<_, _>>().unwrap();
        assert_eq!(walked, vec![c2, c1]);
    }
}
