use std::collections::BTreeMap;
use std::fs;
use std::io::Write as _;

use ugit_hash::ObjectId;
use ugit_history::get_merge_base;
use ugit_object::ObjectType;
use ugit_ref::{RefName, RefValue};
use ugit_repo::Repo;
use ugit_utils::subprocess::{ExternalCommand, StdioMode};
use ugit_utils::tempfile::TempFile;

use crate::compare::compare_trees;
use crate::error::DiffError;

/// Three-way merge of flattened trees, writing each merged blob to `store`
/// and returning the resulting `path → oid` map. Conflicting regions carry
/// `diff3`-style conflict markers verbatim, same as a failed merge on disk.
pub fn merge_trees(
    repo: &Repo,
    base: &BTreeMap<String, ObjectId>,
    head: &BTreeMap<String, ObjectId>,
    other: &BTreeMap<String, ObjectId>,
) -> Result<BTreeMap<String, ObjectId>, DiffError> {
    let mut merged = BTreeMap::new();
    for (path, oids) in compare_trees(&[base, head, other]) {
        let content = merge_blobs(repo, oids[0], oids[1], oids[2])?;
        let oid = repo.store().hash_object(ObjectType::Blob, &content)?;
        merged.insert(path, oid);
    }
    Ok(merged)
}

fn merge_blobs(
    repo: &Repo,
    o_base: Option<ObjectId>,
    o_head: Option<ObjectId>,
    o_other: Option<ObjectId>,
) -> Result<Vec<u8>, DiffError> {
    let dir = std::env::temp_dir();
    let mut f_base = TempFile::new_in(&dir)?;
    let mut f_head = TempFile::new_in(&dir)?;
    let mut f_other = TempFile::new_in(&dir)?;

    for (oid, f) in [(o_base, &mut f_base), (o_head, &mut f_head), (o_other, &mut f_other)] {
        if let Some(oid) = oid {
            f.write_all(&repo.store().get_object(&oid, Some(ObjectType::Blob))?)?;
            f.flush()?;
        }
    }

    let result = ExternalCommand::new("diff3")
        .arg("-m")
        .arg("-L")
        .arg("HEAD")
        .arg(f_head.path())
        .arg("-L")
        .arg("BASE")
        .arg(f_base.path())
        .arg("-L")
        .arg("MERGE_HEAD")
        .arg(f_other.path())
        .stdout(StdioMode::Pipe)
        .stderr(StdioMode::Null)
        .run()?;

    match result.code() {
        Some(0) | Some(1) => Ok(result.stdout),
        _ => Err(DiffError::UnexpectedExit {
            program: "diff3",
            status: result.code(),
        }),
    }
}

/// Outcome of [`merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// HEAD was an ancestor of `other`; HEAD now points directly at it and
    /// the working tree matches `other`'s tree. Nothing to commit.
    FastForward,
    /// A three-way merge was written into the working tree, `MERGE_HEAD`
    /// recorded, and a commit is still needed to conclude it.
    Merged,
}

/// Merge `other` into HEAD.
///
/// If HEAD is an ancestor of `other`, fast-forwards by moving HEAD and
/// loading `other`'s tree. Otherwise performs a three-way merge against
/// the nearest common ancestor, writing the result (with any conflict
/// markers) into the working tree and recording `MERGE_HEAD`.
pub fn merge(repo: &Repo, other: ObjectId) -> Result<MergeOutcome, DiffError> {
    let head_name = RefName::new("HEAD").expect("HEAD is a valid ref name");
    let head = match repo.refs().get_ref(&head_name, true)?.value {
        Some(RefValue::Direct(oid)) => oid,
        _ => return Err(DiffError::ObjectNotFound(other)),
    };

    let merge_base = get_merge_base(repo, other, head).map_err(|_| DiffError::ObjectNotFound(other))?;
    let c_other = repo.get_commit(&other)?;

    if merge_base == Some(head) {
        repo.read_tree(&c_other.tree)?;
        repo.refs().update_ref(&head_name, &RefValue::Direct(other), true)?;
        return Ok(MergeOutcome::FastForward);
    }

    let merge_head_name = RefName::new("MERGE_HEAD").expect("MERGE_HEAD is a valid ref name");
    repo.refs().update_ref(&merge_head_name, &RefValue::Direct(other), false)?;

    let base_oid = merge_base.ok_or(DiffError::ObjectNotFound(other))?;
    let c_base = repo.get_commit(&base_oid)?;
    let c_head = repo.get_commit(&head)?;

    let t_base = repo.get_tree(&c_base.tree, "")?;
    let t_head = repo.get_tree(&c_head.tree, "")?;
    let t_other = repo.get_tree(&c_other.tree, "")?;

    let merged = merge_trees(repo, &t_base, &t_head, &t_other)?;
    write_merged_tree(repo, &merged)?;

    Ok(MergeOutcome::Merged)
}

fn write_merged_tree(repo: &Repo, merged: &BTreeMap<String, ObjectId>) -> Result<(), DiffError> {
    repo.clear_working_tree()?;
    for (path, oid) in merged {
        let full_path = repo.work_dir().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = repo.store().get_object(oid, Some(ObjectType::Blob))?;
        fs::write(full_path, content)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_forward_merge_moves_head() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"1\n").unwrap();
        let c1 = repo.commit("first").unwrap();
        fs::write(dir.path().join("a.txt"), b"2\n").unwrap();
        let c2 = repo.commit("second").unwrap();

        let head_name = RefName::new("HEAD").unwrap();
        repo.refs().update_ref(&head_name, &RefValue::Direct(c1), true).unwrap();

        let outcome = merge(&repo, c2).unwrap();
        assert_eq!(outcome, MergeOutcome::FastForward);
        assert_eq!(
            repo.refs().get_ref(&head_name, true).unwrap().value,
            Some(RefValue::Direct(c2))
        );
    }

    #[test]
    fn fast_forward_merge_moves_branch_not_head_itself() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"1\n").unwrap();
        let c1 = repo.commit("first").unwrap();
        fs::write(dir.path().join("a.txt"), b"2\n").unwrap();
        let c2 = repo.commit("second").unwrap();

        let head_name = RefName::new("HEAD").unwrap();
        let main_name = RefName::new("refs/heads/main").unwrap();
        repo.refs().update_ref(&main_name, &RefValue::Direct(c1), true).unwrap();

        let outcome = merge(&repo, c2).unwrap();
        assert_eq!(outcome, MergeOutcome::FastForward);

        assert_eq!(
            repo.refs().get_ref(&head_name, false).unwrap().value,
            Some(RefValue::Symbolic(main_name.clone())),
            "HEAD must stay symbolic, not get overwritten with a bare OID"
        );
        assert_eq!(
            repo.refs().get_ref(&main_name, true).unwrap().value,
            Some(RefValue::Direct(c2))
        );
    }
}
