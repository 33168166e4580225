use std::fs;

use ugit_hash::ObjectId;
use ugit_object::ObjectType;

use crate::{ObjectStore, StoreError};

impl ObjectStore {
    /// Check if an object exists.
    pub fn object_exists(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }

    /// Read an object's payload, splitting the stored bytes on the first
    /// `0x00` to recover the kind prefix.
    ///
    /// If `expected_kind` is set and differs from the stored kind, fails
    /// with [`StoreError::KindMismatch`].
    pub fn get_object(
        &self,
        oid: &ObjectId,
        expected_kind: Option<ObjectType>,
    ) -> Result<Vec<u8>, StoreError> {
        let path = self.object_path(oid);
        let bytes = fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound { oid: oid.to_hex() }
            } else {
                StoreError::Io(e)
            }
        })?;

        let sep = bytes.iter().position(|&b| b == 0).ok_or_else(|| StoreError::Corrupt {
            oid: oid.to_hex(),
            reason: "no NUL separator between kind and payload".into(),
        })?;

        let kind = ObjectType::from_bytes(&bytes[..sep]).map_err(|e| StoreError::Corrupt {
            oid: oid.to_hex(),
            reason: e.to_string(),
        })?;

        if let Some(expected) = expected_kind {
            if expected != kind {
                return Err(StoreError::KindMismatch {
                    oid: oid.to_hex(),
                    expected,
                    actual: kind,
                });
            }
        }

        Ok(bytes[sep + 1..].to_vec())
    }

    /// Read an object's kind without caring about its payload.
    pub fn get_kind(&self, oid: &ObjectId) -> Result<ObjectType, StoreError> {
        let path = self.object_path(oid);
        let bytes = fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound { oid: oid.to_hex() }
            } else {
                StoreError::Io(e)
            }
        })?;
        let sep = bytes.iter().position(|&b| b == 0).ok_or_else(|| StoreError::Corrupt {
            oid: oid.to_hex(),
            reason: "no NUL separator between kind and payload".into(),
        })?;
        ObjectType::from_bytes(&bytes[..sep]).map_err(|e| StoreError::Corrupt {
            oid: oid.to_hex(),
            reason: e.to_string(),
        })
    }
}
