use std::collections::HashSet;

use ugit_hash::ObjectId;
use ugit_repo::Repo;

use crate::{walk::iter_commits_and_parents, HistoryError};

/// The first ancestor of `b` (walked in BFS order) that is also an
/// ancestor of `a`. Not a strict lowest-common-ancestor: with multiple
/// merge bases this returns whichever one the traversal order surfaces
/// first, which is sufficient for fast-forward and three-way merge
/// decisions.
pub fn get_merge_base(
    repo: &Repo,
    a: ObjectId,
    b: ObjectId,
) -> Result<Option<ObjectId>, HistoryError> {
    let ancestors_of_a: HashSet<ObjectId> = iter_commits_and_parents(repo, [a]).collect::<Result<_, _>>()?;

    for oid in iter_commits_and_parents(repo, [b]) {
        let oid = oid?;
        if ancestors_of_a.contains(&oid) {
            return Ok(Some(oid));
        }
    }
    Ok(None)
}

/// Whether `maybe_ancestor` is `commit` itself or one of its ancestors.
pub fn is_ancestor_of(
    repo: &Repo,
    commit: ObjectId,
    maybe_ancestor: ObjectId,
) -> Result<bool, HistoryError> {
    for oid in iter_commits_and_parents(repo, [commit]) {
        if oid? == maybe_ancestor {
            return Ok(true);
        }
    }
    Ok(false)
}
