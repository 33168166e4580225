use std::collections::BTreeMap;
use std::io::Write as _;

use ugit_hash::ObjectId;
use ugit_object::ObjectType;
use ugit_store::ObjectStore;
use ugit_utils::subprocess::{ExternalCommand, StdioMode};
use ugit_utils::tempfile::TempFile;

use crate::compare::compare_trees;
use crate::error::DiffError;

/// Unified diff between two flattened trees, shelling out to `diff` for
/// each changed path and concatenating the output.
pub fn diff_trees(
    store: &ObjectStore,
    from: &BTreeMap<String, ObjectId>,
    to: &BTreeMap<String, ObjectId>,
) -> Result<Vec<u8>, DiffError> {
    let mut output = Vec::new();
    for (path, oids) in compare_trees(&[from, to]) {
        let (o_from, o_to) = (oids[0], oids[1]);
        if o_from != o_to {
            output.extend(diff_blobs(store, o_from, o_to, &path)?);
        }
    }
    Ok(output)
}

fn diff_blobs(
    store: &ObjectStore,
    o_from: Option<ObjectId>,
    o_to: Option<ObjectId>,
    path: &str,
) -> Result<Vec<u8>, DiffError> {
    let dir = std::env::temp_dir();
    let mut f_from = TempFile::new_in(&dir)?;
    let mut f_to = TempFile::new_in(&dir)?;

    if let Some(oid) = o_from {
        f_from.write_all(&store.get_object(&oid, Some(ObjectType::Blob))?)?;
        f_from.flush()?;
    }
    if let Some(oid) = o_to {
        f_to.write_all(&store.get_object(&oid, Some(ObjectType::Blob))?)?;
        f_to.flush()?;
    }

    let result = ExternalCommand::new("diff")
        .args(["--unified", "--show-c-function"])
        .arg("--label")
        .arg(format!("a/{path}"))
        .arg(f_from.path())
        .arg("--label")
        .arg(format!("b/{path}"))
        .arg(f_to.path())
        .stdout(StdioMode::Pipe)
        .stderr(StdioMode::Null)
        .run()?;

    match result.code() {
        Some(0) | Some(1) => Ok(result.stdout),
        _ => Err(DiffError::UnexpectedExit {
            program: "diff",
            status: result.code(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_trees_is_empty_when_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(dir.path());
        let oid = store.hash_object(ObjectType::Blob, b"hello\n").unwrap();

        let mut from = BTreeMap::new();
        from.insert("a.txt".to_string(), oid);
        let to = from.clone();

        let output = diff_trees(&store, &from, &to).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn diff_trees_labels_changed_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(dir.path());
        let o_from = store.hash_object(ObjectType::Blob, b"one\n").unwrap();
        let o_to = store.hash_object(ObjectType::Blob, b"two\n").unwrap();

        let mut from = BTreeMap::new();
        from.insert("a.txt".to_string(), o_from);
        let mut to = BTreeMap::new();
        to.insert("a.txt".to_string(), o_to);

        let output = diff_trees(&store, &from, &to).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("a/a.txt"));
        assert!(text.contains("b/a.txt"));
    }
}
