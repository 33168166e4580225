use ugit_hash::ObjectId;
use ugit_ref::{RefName, RefValue};
use ugit_repo::Repo;

use crate::branch::is_branch;
use crate::resolve::resolve_name;
use crate::HistoryError;

/// Resolve `name`, load its tree into the working directory, and point
/// HEAD at it non-dereferenced: symbolic to `refs/heads/<name>` if `name`
/// names an existing branch, otherwise direct (detached HEAD).
pub fn checkout(repo: &Repo, name: &str) -> Result<ObjectId, HistoryError> {
    let oid = resolve_name(repo, name)?;
    let commit = repo.get_commit(&oid)?;
    repo.read_tree(&commit.tree)?;

    let head_name = RefName::new("HEAD").expect("HEAD is a valid ref name");
    let value = if is_branch(repo, name)? {
        RefValue::Symbolic(
            RefName::new(format!("refs/heads/{name}")).expect("branch name already validated"),
        )
    } else {
        RefValue::Direct(oid)
    };
    repo.refs().update_ref(&head_name, &value, false)?;
    Ok(oid)
}

/// Move HEAD to `oid` directly, following any symbolic chain to its
/// terminal name. Does not touch the working directory.
pub fn reset(repo: &Repo, oid: ObjectId) -> Result<(), HistoryError> {
    let head_name = RefName::new("HEAD").expect("HEAD is a valid ref name");
    repo.refs().update_ref(&head_name, &RefValue::Direct(oid), true)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::{create_branch, get_branch_name};
    use std::fs;

    #[test]
    fn checkout_branch_leaves_head_symbolic() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"1\n").unwrap();
        let c1 = repo.commit("first").unwrap();
        create_branch(&repo, "feature", c1).unwrap();

        checkout(&repo, "feature").unwrap();
        assert_eq!(get_branch_name(&repo).unwrap(), Some("feature".to_string()));
    }

    #[test]
    fn checkout_oid_detaches_head() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"1\n").unwrap();
        let c1 = repo.commit("first").unwrap();

        checkout(&repo, &c1.to_hex()).unwrap();
        assert_eq!(get_branch_name(&repo).unwrap(), None);
    }

    #[test]
    fn reset_moves_head_without_touching_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"1\n").unwrap();
        let c1 = repo.commit("first").unwrap();
        fs::write(dir.path().join("a.txt"), b"2\n").unwrap();
        let c2 = repo.commit("second").unwrap();

        reset(&repo, c1).unwrap();
        assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"2\n");
        let head = RefName::new("HEAD").unwrap();
        assert_eq!(repo.refs().get_ref(&head, true).unwrap().value, Some(RefValue::Direct(c1)));
        let _ = c2;
    }
}
