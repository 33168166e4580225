use std::fs;
use std::path::PathBuf;

use ugit_hash::ObjectId;

use crate::{ObjectStore, StoreError};

/// Iterator over all object OIDs in the store.
///
/// The object directory is flat, so this is a single sorted directory
/// listing filtered to 40-hex-digit filenames (temp files during a write
/// are named `tmp_obj_*` and are skipped).
pub struct ObjectIter {
    entries: std::vec::IntoIter<PathBuf>,
}

impl ObjectIter {
    fn new(objects_dir: &std::path::Path) -> Result<Self, StoreError> {
        let mut entries: Vec<PathBuf> = Vec::new();
        if objects_dir.is_dir() {
            for entry in fs::read_dir(objects_dir)? {
                let entry = entry?;
                if entry.file_type()?.is_file() {
                    let name = entry.file_name();
                    if ObjectId::looks_like_oid(&name.to_string_lossy()) {
                        entries.push(entry.path());
                    }
                }
            }
        }
        entries.sort();
        Ok(Self {
            entries: entries.into_iter(),
        })
    }
}

impl Iterator for ObjectIter {
    type Item = Result<ObjectId, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.entries.next()?;
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(ObjectId::from_hex(&name).map_err(StoreError::from))
    }
}

impl ObjectStore {
    /// Iterate over all object OIDs currently in the store.
    pub fn iter(&self) -> Result<ObjectIter, StoreError> {
        ObjectIter::new(&self.objects_dir)
    }
}
