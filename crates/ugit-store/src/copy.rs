use std::fs;

use ugit_hash::ObjectId;

use crate::{ObjectStore, StoreError};

impl ObjectStore {
    /// Copy one object's file, byte for byte, into another store.
    ///
    /// Precondition: the object exists in `self`. A no-op if it already
    /// exists in `other` — content-addressing makes the bytes identical.
    pub fn copy_object_to(&self, oid: &ObjectId, other: &ObjectStore) -> Result<(), StoreError> {
        if other.object_exists(oid) {
            return Ok(());
        }
        let bytes = fs::read(self.object_path(oid)).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound { oid: oid.to_hex() }
            } else {
                StoreError::Io(e)
            }
        })?;
        fs::create_dir_all(&other.objects_dir)?;
        fs::write(other.object_path(oid), bytes)?;
        Ok(())
    }

    /// Copy one object's file, byte for byte, from another store into `self`.
    pub fn copy_object_from(&self, oid: &ObjectId, other: &ObjectStore) -> Result<(), StoreError> {
        other.copy_object_to(oid, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ugit_object::ObjectType;

    #[test]
    fn copy_to_transfers_bytes() {
        let src_dir = tempfile::tempdir().unwrap();
        let dst_dir = tempfile::tempdir().unwrap();
        let src = ObjectStore::open(src_dir.path());
        let dst = ObjectStore::open(dst_dir.path());

        let oid = src.hash_object(ObjectType::Blob, b"hello\n").unwrap();
        src.copy_object_to(&oid, &dst).unwrap();

        assert!(dst.object_exists(&oid));
        assert_eq!(dst.get_object(&oid, Some(ObjectType::Blob)).unwrap(), b"hello\n");
    }

    #[test]
    fn copy_missing_object_fails() {
        let src_dir = tempfile::tempdir().unwrap();
        let dst_dir = tempfile::tempdir().unwrap();
        let src = ObjectStore::open(src_dir.path());
        let dst = ObjectStore::open(dst_dir.path());

        let oid = ObjectId::from_hex("0000000000000000000000000000000000000001").unwrap();
        assert!(src.copy_object_to(&oid, &dst).is_err());
    }
}
