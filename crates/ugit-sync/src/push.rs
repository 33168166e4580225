use std::collections::HashSet;
use std::path::Path;

use ugit_hash::ObjectId;
use ugit_history::{is_ancestor_of, iter_objects_in_commits};
use ugit_ref::{RefName, RefValue};
use ugit_repo::Repo;

use crate::error::SyncError;

/// Push `refname` from `local` to the repository at `remote_path`.
///
/// Requires the local ref to exist. If the remote already has
/// `refname`, requires the remote's current OID to be an ancestor of
/// the local OID (fast-forward), else fails with
/// [`SyncError::NonFastForward`]. Copies every object reachable from
/// the local ref that the remote doesn't already have, then updates
/// the remote's ref.
pub fn push(local: &Repo, remote_path: impl AsRef<Path>, refname: &str) -> Result<(), SyncError> {
    let remote = Repo::open(remote_path);
    let ref_name = RefName::new(refname)?;

    let local_oid = match local.refs().get_ref(&ref_name, true)?.value {
        Some(RefValue::Direct(oid)) => oid,
        _ => return Err(SyncError::UnknownRef(refname.to_string())),
    };

    let remote_oid = match remote.refs().get_ref(&ref_name, true)?.value {
        Some(RefValue::Direct(oid)) => Some(oid),
        _ => None,
    };

    if let Some(remote_oid) = remote_oid {
        if !is_ancestor_of(local, local_oid, remote_oid)? {
            return Err(SyncError::NonFastForward);
        }
    }

    // Every remote ref the local repo already has the commit for is a
    // frontier the push doesn't need to re-walk or re-copy past, not just
    // the one ref being pushed — a remote with other branches sharing
    // history with `refname` would otherwise get redundant object copies.
    let known_remote_objects: Vec<ObjectId> = remote
        .refs()
        .iter_refs("refs/", true)?
        .into_iter()
        .filter_map(|(_, lookup)| match lookup.value {
            Some(RefValue::Direct(oid)) => Some(oid),
            _ => None,
        })
        .filter(|oid| local.store().object_exists(oid))
        .collect();
    let remote_objects: HashSet<ObjectId> =
        iter_objects_in_commits(local, known_remote_objects)?.into_iter().collect();

    for oid in iter_objects_in_commits(local, [local_oid])? {
        if !remote_objects.contains(&oid) {
            local.store().copy_object_to(&oid, remote.store())?;
        }
    }

    remote.refs().update_ref(&ref_name, &RefValue::Direct(local_oid), false)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn push_new_branch_to_empty_remote() {
        let local_dir = tempfile::tempdir().unwrap();
        let local = Repo::init(local_dir.path()).unwrap();
        fs::write(local_dir.path().join("a.txt"), b"1\n").unwrap();
        let c1 = local.commit("first").unwrap();

        let remote_dir = tempfile::tempdir().unwrap();
        Repo::init(remote_dir.path()).unwrap();

        push(&local, remote_dir.path(), "refs/heads/main").unwrap();

        let remote = Repo::open(remote_dir.path());
        let main = RefName::new("refs/heads/main").unwrap();
        assert_eq!(remote.refs().get_ref(&main, true).unwrap().value, Some(RefValue::Direct(c1)));
        assert!(remote.store().object_exists(&c1));
    }

    #[test]
    fn non_fast_forward_push_is_rejected() {
        let local_dir = tempfile::tempdir().unwrap();
        let local = Repo::init(local_dir.path()).unwrap();
        fs::write(local_dir.path().join("a.txt"), b"1\n").unwrap();
        let c1 = local.commit("first").unwrap();

        let remote_dir = tempfile::tempdir().unwrap();
        let remote = Repo::init(remote_dir.path()).unwrap();
        fs::write(remote_dir.path().join("a.txt"), b"2\n").unwrap();
        let unrelated = remote.commit("unrelated").unwrap();
        let main = RefName::new("refs/heads/main").unwrap();
        remote.refs().update_ref(&main, &RefValue::Direct(unrelated), true).unwrap();

        let err = push(&local, remote_dir.path(), "refs/heads/main").unwrap_err();
        assert!(matches!(err, SyncError::NonFastForward));
        let _ = c1;
    }

    #[test]
    fn fast_forward_push_succeeds() {
        let local_dir = tempfile::tempdir().unwrap();
        let local = Repo::init(local_dir.path()).unwrap();
        fs::write(local_dir.path().join("a.txt"), b"1\n").unwrap();
        let c1 = local.commit("first").unwrap();

        let remote_dir = tempfile::tempdir().unwrap();
        let remote = Repo::init(remote_dir.path()).unwrap();
        let main = RefName::new("refs/heads/main").unwrap();
        remote.refs().update_ref(&main, &RefValue::Direct(c1), true).unwrap();

        fs::write(local_dir.path().join("a.txt"), b"2\n").unwrap();
        let c2 = local.commit("second").unwrap();

        push(&local, remote_dir.path(), "refs/heads/main").unwrap();
        assert_eq!(remote.refs().get_ref(&main, true).unwrap().value, Some(RefValue::Direct(c2)));
    }
}
