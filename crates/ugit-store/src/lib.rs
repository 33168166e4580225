//! The object store: flat, uncompressed, content-addressed storage at
//! `objects/<oid>`. No fan-out directories, no packfiles — every object is
//! one file whose name is the hex digest of its own bytes.

mod copy;
mod enumerate;
mod read;
mod write;

pub use enumerate::ObjectIter;

use std::path::{Path, PathBuf};

use ugit_object::ObjectType;

/// Interface to the flat object directory (`.ugit/objects/`).
pub struct ObjectStore {
    objects_dir: PathBuf,
}

impl ObjectStore {
    /// Open the object store at the given path. The directory need not
    /// exist yet; it is created lazily on first write.
    pub fn open(objects_dir: impl AsRef<Path>) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
        }
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// The file path for a given OID.
    pub fn object_path(&self, oid: &ugit_hash::ObjectId) -> PathBuf {
        self.objects_dir.join(oid.to_hex())
    }
}

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("object {oid} not found")]
    NotFound { oid: String },

    #[error("object {oid}: expected kind {expected}, found {actual}")]
    KindMismatch {
        oid: String,
        expected: ObjectType,
        actual: ObjectType,
    },

    #[error("corrupt object {oid}: {reason}")]
    Corrupt { oid: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Hash(#[from] ugit_hash::HashError),

    #[error(transparent)]
    Object(#[from] ugit_object::ObjectError),
}
