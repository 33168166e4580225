use ugit_hash::ObjectId;
use ugit_ref::{RefName, RefValue};
use ugit_repo::Repo;

use crate::HistoryError;

const HEADS_PREFIX: &str = "refs/heads/";
const TAGS_PREFIX: &str = "refs/tags/";

/// Create (or move) branch `name` to point directly at `oid`.
pub fn create_branch(repo: &Repo, name: &str, oid: ObjectId) -> Result<(), HistoryError> {
    let ref_name = RefName::new(format!("{HEADS_PREFIX}{name}"))
        .map_err(|_| HistoryError::UnknownName(name.to_string()))?;
    repo.refs().update_ref(&ref_name, &RefValue::Direct(oid), true)?;
    Ok(())
}

/// Create a tag `name` pointing directly at `oid`.
pub fn create_tag(repo: &Repo, name: &str, oid: ObjectId) -> Result<(), HistoryError> {
    let ref_name = RefName::new(format!("{TAGS_PREFIX}{name}"))
        .map_err(|_| HistoryError::UnknownName(name.to_string()))?;
    repo.refs().update_ref(&ref_name, &RefValue::Direct(oid), true)?;
    Ok(())
}

/// Whether `refs/heads/<name>` exists.
pub fn is_branch(repo: &Repo, name: &str) -> Result<bool, HistoryError> {
    let Ok(ref_name) = RefName::new(format!("{HEADS_PREFIX}{name}")) else {
        return Ok(false);
    };
    Ok(repo.refs().get_ref(&ref_name, true)?.value.is_some())
}

/// The branch HEAD currently points to, or `None` if HEAD is detached.
pub fn get_branch_name(repo: &Repo) -> Result<Option<String>, HistoryError> {
    let head_name = RefName::new("HEAD").expect("HEAD is a valid ref name");
    let lookup = repo.refs().get_ref(&head_name, false)?;
    if !lookup.symbolic {
        return Ok(None);
    }
    match lookup.value {
        Some(RefValue::Symbolic(target)) => Ok(Some(target.short_name().to_string())),
        _ => Ok(None),
    }
}

/// All local branch names, sorted.
pub fn iter_branch_names(repo: &Repo) -> Result<Vec<String>, HistoryError> {
    let mut names: Vec<String> = repo
        .refs()
        .iter_refs(HEADS_PREFIX, false)?
        .into_iter()
        .filter_map(|(name, _)| name.strip_prefix(HEADS_PREFIX).map(|s| s.to_string()))
        .collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn create_and_detect_branch() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"1\n").unwrap();
        let c1 = repo.commit("first").unwrap();

        create_branch(&repo, "feature", c1).unwrap();
        assert!(is_branch(&repo, "feature").unwrap());
        assert!(!is_branch(&repo, "nope").unwrap());
    }

    #[test]
    fn head_starts_on_main() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        assert_eq!(get_branch_name(&repo).unwrap(), Some("main".to_string()));
    }

    #[test]
    fn iter_branch_names_lists_all_heads() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"1\n").unwrap();
        let c1 = repo.commit("first").unwrap();
        create_branch(&repo, "feature", c1).unwrap();

        let names = iter_branch_names(&repo).unwrap();
        assert_eq!(names, vec!["feature".to_string(), "main".to_string()]);
    }
}
