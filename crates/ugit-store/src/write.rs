use std::fs;
use std::path::Path;

use ugit_hash::hasher::Hasher;
use ugit_hash::ObjectId;
use ugit_object::ObjectType;

use crate::{ObjectStore, StoreError};

impl ObjectStore {
    /// Write `kind‖0x00‖payload` to the store. Returns the OID.
    ///
    /// No-op if the object already exists (idempotent by content). The
    /// write is atomic: a temp file in the same directory, then a rename.
    pub fn hash_object(&self, kind: ObjectType, payload: &[u8]) -> Result<ObjectId, StoreError> {
        let oid = Hasher::hash_object(kind.as_str(), payload)?;

        if self.object_exists(&oid) {
            return Ok(oid);
        }

        fs::create_dir_all(&self.objects_dir)?;

        let mut bytes = Vec::with_capacity(kind.as_str().len() + 1 + payload.len());
        bytes.extend_from_slice(kind.as_str().as_bytes());
        bytes.push(0);
        bytes.extend_from_slice(payload);

        let tmp_path = write_to_temp(&self.objects_dir, &bytes)?;
        finalize_object(&tmp_path, &self.object_path(&oid))?;

        Ok(oid)
    }
}

/// Write bytes to a uniquely-named temp file under `objects_dir`.
fn write_to_temp(objects_dir: &Path, bytes: &[u8]) -> Result<std::path::PathBuf, StoreError> {
    let tmp_path = objects_dir.join(format!(
        "tmp_obj_{}",
        std::process::id()
            ^ std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .subsec_nanos()
    ));
    fs::write(&tmp_path, bytes)?;
    Ok(tmp_path)
}

/// Atomically move a temp file to its final destination.
///
/// If the destination already exists (race with another writer), the temp
/// file is removed and the write is treated as successful — the content is
/// identical by construction, since the filename is its own digest.
fn finalize_object(tmp: &Path, final_path: &Path) -> Result<(), StoreError> {
    match fs::rename(tmp, final_path) {
        Ok(()) => Ok(()),
        Err(_) if final_path.exists() => {
            let _ = fs::remove_file(tmp);
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(tmp);
            Err(StoreError::Io(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_object_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(dir.path());
        let oid1 = store.hash_object(ObjectType::Blob, b"hello\n").unwrap();
        let oid2 = store.hash_object(ObjectType::Blob, b"hello\n").unwrap();
        assert_eq!(oid1, oid2);
        assert!(store.object_exists(&oid1));
    }

    #[test]
    fn different_kinds_hash_differently() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(dir.path());
        let blob = store.hash_object(ObjectType::Blob, b"x").unwrap();
        let tree = store.hash_object(ObjectType::Tree, b"x").unwrap();
        assert_ne!(blob, tree);
    }
}
