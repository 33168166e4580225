use std::collections::BTreeMap;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use ugit_hash::ObjectId;
use ugit_hash::hasher::Hasher;
use ugit_utils::ignore::is_ignored;
use ugit_utils::lockfile::LockFile;

use crate::{Repo, RepoError};

/// The staging map `path → oid` representing the next commit's contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    entries: BTreeMap<String, ObjectId>,
}

impl Index {
    pub fn entries(&self) -> &BTreeMap<String, ObjectId> {
        &self.entries
    }

    fn parse(bytes: &[u8]) -> Result<Self, RepoError> {
        let mut entries = BTreeMap::new();
        let text = std::str::from_utf8(bytes)
            .map_err(|_| RepoError::MalformedObject("index is not valid UTF-8".into()))?;
        for line in text.lines() {
            let (hex, path) = line.split_once(' ').ok_or_else(|| {
                RepoError::MalformedObject(format!("malformed index line: {line:?}"))
            })?;
            entries.insert(path.to_string(), ObjectId::from_hex(hex)?);
        }
        Ok(Self { entries })
    }

    fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (path, oid) in &self.entries {
            out.extend_from_slice(oid.to_hex().as_bytes());
            out.push(b' ');
            out.extend_from_slice(path.as_bytes());
            out.push(b'\n');
        }
        out
    }
}

impl Repo {
    /// Load the index, or an empty one if it has never been written.
    pub fn load_index(&self) -> Result<Index, RepoError> {
        match fs::read(self.index_path()) {
            Ok(bytes) => Index::parse(&bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Index::default()),
            Err(e) => Err(RepoError::Io(e)),
        }
    }

    /// Stage `paths`: files are hashed and recorded by their path relative
    /// to the working directory; directories are recursed, skipping
    /// ignored entries. The index is acquired exclusively for the
    /// duration of the update and persisted on success.
    pub fn add(&self, paths: &[PathBuf]) -> Result<(), RepoError> {
        let mut lock = LockFile::acquire(self.index_path())?;

        let mut index = match fs::read(self.index_path()) {
            Ok(bytes) => Index::parse(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Index::default(),
            Err(e) => return Err(RepoError::Io(e)),
        };

        for path in paths {
            self.add_path(path, &mut index)?;
        }

        lock.write_all(&index.serialize())?;
        lock.commit()?;
        Ok(())
    }

    fn add_path(&self, path: &Path, index: &mut Index) -> Result<(), RepoError> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir.join(path)
        };

        if absolute.is_file() {
            let relpath = relative_path(&self.work_dir, &absolute);
            let content = fs::read(&absolute)?;
            let oid = Hasher::hash_object("blob", &content)?;
            index.entries.insert(relpath, oid);
        } else if absolute.is_dir() {
            let mut entries: Vec<_> = fs::read_dir(&absolute)?.collect::<Result<_, _>>()?;
            entries.sort_by_key(|e| e.file_name());
            for entry in entries {
                let name = entry.file_name();
                if is_ignored(Path::new(&name)) {
                    continue;
                }
                self.add_path(&entry.path(), index)?;
            }
        }
        Ok(())
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
