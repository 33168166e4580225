use ugit_hash::ObjectId;
use ugit_object::{Commit, ObjectType};
use ugit_ref::{RefName, RefValue};

use crate::{Repo, RepoError};

impl Repo {
    /// Build a commit over the current working tree: `tree <write_tree(.)>`,
    /// a `parent` header for HEAD (if any) and for MERGE_HEAD (if any,
    /// clearing it afterward), then the message. Updates HEAD (dereffed).
    pub fn commit(&self, message: &str) -> Result<ObjectId, RepoError> {
        let tree_oid = self.write_tree(&self.work_dir)?;
        let mut parents = Vec::new();

        let head_name = RefName::new("HEAD").expect("HEAD is a valid ref name");
        if let Some(RefValue::Direct(oid)) = self.refs.get_ref(&head_name, true)?.value {
            parents.push(oid);
        }

        let merge_head_name = RefName::new("MERGE_HEAD").expect("MERGE_HEAD is a valid ref name");
        if let Some(RefValue::Direct(oid)) = self.refs.get_ref(&merge_head_name, true)?.value {
            parents.push(oid);
            self.refs.delete_ref(&merge_head_name, false)?;
        }

        let mut text = message.to_string();
        if !text.ends_with('\n') {
            text.push('\n');
        }

        let commit = Commit::new(tree_oid, parents, text);
        let content = commit.serialize_content();
        let oid = self.store.hash_object(ObjectType::Commit, &content)?;
        self.refs.update_ref(&head_name, &RefValue::Direct(oid), true)?;
        Ok(oid)
    }

    /// Parse a stored commit object.
    pub fn get_commit(&self, oid: &ObjectId) -> Result<Commit, RepoError> {
        let content = self.store.get_object(oid, Some(ObjectType::Commit))?;
        Commit::parse(&content).map_err(RepoError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn first_commit_has_no_parents() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"hello\n").unwrap();

        let oid = repo.commit("first").unwrap();
        let commit = repo.get_commit(&oid).unwrap();
        assert!(commit.parents.is_empty());
        assert_eq!(commit.message.as_ref() as &[u8], b"first\n");
    }

    #[test]
    fn second_commit_parents_on_the_first() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"hello\n").unwrap();
        let c1 = repo.commit("first").unwrap();

        fs::write(dir.path().join("a.txt"), b"hello world\n").unwrap();
        let c2 = repo.commit("second").unwrap();

        let commit2 = repo.get_commit(&c2).unwrap();
        assert_eq!(commit2.parents, vec![c1]);
    }

    #[test]
    fn commit_clears_merge_head() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"hello\n").unwrap();
        let c1 = repo.commit("first").unwrap();

        let merge_head = RefName::new("MERGE_HEAD").unwrap();
        repo.refs().update_ref(&merge_head, &RefValue::Direct(c1), false).unwrap();

        let c2 = repo.commit("merge commit").unwrap();
        let commit2 = repo.get_commit(&c2).unwrap();
        assert_eq!(commit2.parents, vec![c1, c1]);
        assert_eq!(repo.refs().get_ref(&merge_head, false).unwrap().value, None);
    }
}
