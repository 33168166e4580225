use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use bstr::BString;
use ugit_hash::ObjectId;
use ugit_object::{EntryKind, Tree, TreeEntry};
use ugit_utils::ignore::is_ignored;

use crate::{Repo, RepoError};

fn is_ignored_name(name: &str) -> bool {
    is_ignored(Path::new(name))
}

impl Repo {
    /// Recursively walk `dir`, writing a blob for each file and a tree for
    /// each subdirectory, skipping ignored basenames. Returns the tree OID.
    pub fn write_tree(&self, dir: &Path) -> Result<ObjectId, RepoError> {
        let mut entries: Vec<TreeEntry> = Vec::new();

        let mut dir_entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
        dir_entries.sort_by_key(|e| e.file_name());

        for entry in dir_entries {
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if is_ignored_name(&name_str) {
                continue;
            }

            let path = entry.path();
            let file_type = entry.file_type()?;

            let (kind, oid) = if file_type.is_file() {
                let content = fs::read(&path)?;
                (EntryKind::Blob, self.store.hash_object(ugit_object::ObjectType::Blob, &content)?)
            } else if file_type.is_dir() {
                (EntryKind::Tree, self.write_tree(&path)?)
            } else {
                continue;
            };

            entries.push(TreeEntry {
                kind,
                oid,
                name: BString::from(name_str.as_ref()),
            });
        }

        let mut tree = Tree { entries };
        tree.sort();
        let content = tree.serialize_content();
        Ok(self.store.hash_object(ugit_object::ObjectType::Tree, &content)?)
    }

    /// Clear the working tree, then write every blob in `tree_oid`'s
    /// flattened listing to its path.
    pub fn read_tree(&self, tree_oid: &ObjectId) -> Result<(), RepoError> {
        self.clear_working_tree()?;
        for (path, oid) in self.get_tree(tree_oid, "")? {
            let full_path = self.work_dir.join(&path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = self.store.get_object(&oid, Some(ugit_object::ObjectType::Blob))?;
            fs::write(full_path, content)?;
        }
        Ok(())
    }

    /// Post-order delete of every non-ignored file in the working tree,
    /// then remove now-empty directories, tolerating failure when a
    /// directory still holds ignored children.
    ///
    /// Exposed for callers (e.g. merge) that write a tree's contents into
    /// the working directory outside of `read_tree` itself.
    pub fn clear_working_tree(&self) -> Result<(), RepoError> {
        empty_dir(&self.work_dir, &self.work_dir)
    }

    /// Flatten a tree object into `path → blob oid`, relative to `base`.
    pub fn get_tree(&self, tree_oid: &ObjectId, base: &str) -> Result<BTreeMap<String, ObjectId>, RepoError> {
        let mut result = BTreeMap::new();
        let content = self.store.get_object(tree_oid, Some(ugit_object::ObjectType::Tree))?;
        let tree = Tree::parse(&content)?;

        for entry in tree.iter() {
            let name = entry.name.to_string();
            if name.contains('/') || name == "." || name == ".." {
                return Err(RepoError::MalformedObject(format!(
                    "tree entry name {name:?} is invalid"
                )));
            }
            let path = format!("{base}{name}");
            match entry.kind {
                EntryKind::Blob => {
                    result.insert(path, entry.oid);
                }
                EntryKind::Tree => {
                    result.extend(self.get_tree(&entry.oid, &format!("{path}/"))?);
                }
            }
        }
        Ok(result)
    }

    /// Hash every non-ignored file under the working directory without
    /// writing anything to the object store.
    pub fn get_working_tree(&self) -> Result<BTreeMap<String, ObjectId>, RepoError> {
        let mut result = BTreeMap::new();
        collect_working_tree(self, &self.work_dir, &self.work_dir, &mut result)?;
        Ok(result)
    }
}

fn empty_dir(root: &Path, dir: &Path) -> Result<(), RepoError> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in &entries {
        let name = entry.file_name();
        if is_ignored_name(&name.to_string_lossy()) {
            continue;
        }
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            empty_dir(root, &path)?;
        } else if path.is_file() {
            fs::remove_file(&path)?;
        }
    }

    for entry in &entries {
        let name = entry.file_name();
        if is_ignored_name(&name.to_string_lossy()) {
            continue;
        }
        let path = entry.path();
        if path != *root && path.is_dir() {
            let _ = fs::remove_dir(&path);
        }
    }
    Ok(())
}

fn collect_working_tree(
    repo: &Repo,
    root: &Path,
    dir: &Path,
    out: &mut BTreeMap<String, ObjectId>,
) -> Result<(), RepoError> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name();
        if is_ignored_name(&name.to_string_lossy()) {
            continue;
        }
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_working_tree(repo, root, &path, out)?;
        } else if path.is_file() {
            let rel = path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
            let content = fs::read(&path)?;
            let oid = ugit_hash::hasher::Hasher::hash_object("blob", &content)?;
            out.insert(rel, oid);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_tree_then_get_tree_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"hello\n").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("b.txt"), b"world\n").unwrap();

        let tree_oid = repo.write_tree(dir.path()).unwrap();
        let flattened = repo.get_tree(&tree_oid, "").unwrap();

        assert_eq!(flattened.len(), 2);
        assert!(flattened.contains_key("a.txt"));
        assert!(flattened.contains_key("sub/b.txt"));
    }

    #[test]
    fn write_tree_skips_ugit_dir() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"x\n").unwrap();

        let tree_oid = repo.write_tree(dir.path()).unwrap();
        let flattened = repo.get_tree(&tree_oid, "").unwrap();
        assert_eq!(flattened.len(), 1);
    }

    #[test]
    fn empty_directory_produces_empty_tree_deterministically() {
        let dir1 = tempfile::tempdir().unwrap();
        let dir2 = tempfile::tempdir().unwrap();
        let repo1 = Repo::init(dir1.path()).unwrap();
        let repo2 = Repo::init(dir2.path()).unwrap();

        let t1 = repo1.write_tree(dir1.path()).unwrap();
        let t2 = repo2.write_tree(dir2.path()).unwrap();
        assert_eq!(t1, t2);
    }

    #[test]
    fn read_tree_restores_files_and_clears_stale_ones() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"hello\n").unwrap();
        let tree_oid = repo.write_tree(dir.path()).unwrap();

        fs::write(dir.path().join("a.txt"), b"changed\n").unwrap();
        fs::write(dir.path().join("stale.txt"), b"stale\n").unwrap();

        repo.read_tree(&tree_oid).unwrap();

        assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"hello\n");
        assert!(!dir.path().join("stale.txt").exists());
    }

    #[test]
    fn get_working_tree_matches_write_tree_hashes() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"hello\n").unwrap();

        let tree_oid = repo.write_tree(dir.path()).unwrap();
        let from_tree = repo.get_tree(&tree_oid, "").unwrap();
        let working = repo.get_working_tree().unwrap();
        assert_eq!(from_tree, working);
    }
}
