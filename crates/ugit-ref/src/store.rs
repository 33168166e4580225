use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use bstr::ByteSlice;
use ugit_hash::ObjectId;
use ugit_utils::lockfile::LockFile;

use crate::error::RefError;
use crate::name::RefName;

/// Bound on symbolic-ref recursion, guarding against cycles.
const MAX_DEREF_DEPTH: usize = 8;

/// The value stored in a ref file: a direct OID, or a symbolic pointer to
/// another ref name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefValue {
    Direct(ObjectId),
    Symbolic(RefName),
}

/// The result of looking up a ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefLookup {
    /// True only when `deref` was false and the ref is itself symbolic.
    pub symbolic: bool,
    pub value: Option<RefValue>,
}

/// Loose ref storage rooted at a repository's control directory.
pub struct RefStore {
    git_dir: PathBuf,
}

impl RefStore {
    pub fn open(git_dir: impl AsRef<Path>) -> Self {
        Self {
            git_dir: git_dir.as_ref().to_path_buf(),
        }
    }

    fn read_raw(&self, name: &RefName) -> Result<Option<RefValue>, RefError> {
        let path = name.to_path(&self.git_dir);
        let contents = match fs::read(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RefError::IoPath {
                    path,
                    source: e,
                })
            }
        };
        let trimmed = contents.trim();

        if let Some(rest) = trimmed.strip_prefix(b"ref: ") {
            let target_str = std::str::from_utf8(rest.trim())
                .map_err(|_| RefError::Parse("symbolic ref target is not valid UTF-8".into()))?;
            let target = RefName::new(target_str)?;
            Ok(Some(RefValue::Symbolic(target)))
        } else {
            let hex = std::str::from_utf8(trimmed)
                .map_err(|_| RefError::Parse("ref value is not valid UTF-8".into()))?;
            let oid = ObjectId::from_hex(hex)?;
            Ok(Some(RefValue::Direct(oid)))
        }
    }

    /// Follow a symbolic chain to its direct value, bounded by
    /// [`MAX_DEREF_DEPTH`].
    fn resolve_to_direct(&self, name: &RefName, depth: usize) -> Result<Option<RefValue>, RefError> {
        if depth > MAX_DEREF_DEPTH {
            return Err(RefError::RefCycle(name.to_string()));
        }
        match self.read_raw(name)? {
            None => Ok(None),
            Some(RefValue::Direct(oid)) => Ok(Some(RefValue::Direct(oid))),
            Some(RefValue::Symbolic(target)) => self.resolve_to_direct(&target, depth + 1),
        }
    }

    /// The final non-symbolic name a chain starting at `name` resolves to.
    /// A missing ref, or a direct ref, is its own terminal name.
    fn terminal_name(&self, name: &RefName, depth: usize) -> Result<RefName, RefError> {
        if depth > MAX_DEREF_DEPTH {
            return Err(RefError::RefCycle(name.to_string()));
        }
        match self.read_raw(name)? {
            None | Some(RefValue::Direct(_)) => Ok(name.clone()),
            Some(RefValue::Symbolic(target)) => self.terminal_name(&target, depth + 1),
        }
    }

    /// Read a ref's current value.
    ///
    /// With `deref` true, a symbolic ref is followed to its terminal direct
    /// value. With `deref` false, a symbolic ref is reported as-is.
    pub fn get_ref(&self, name: &RefName, deref: bool) -> Result<RefLookup, RefError> {
        match self.read_raw(name)? {
            None => Ok(RefLookup {
                symbolic: false,
                value: None,
            }),
            Some(RefValue::Direct(oid)) => Ok(RefLookup {
                symbolic: false,
                value: Some(RefValue::Direct(oid)),
            }),
            Some(RefValue::Symbolic(target)) => {
                if deref {
                    Ok(RefLookup {
                        symbolic: false,
                        value: self.resolve_to_direct(&target, 1)?,
                    })
                } else {
                    Ok(RefLookup {
                        symbolic: true,
                        value: Some(RefValue::Symbolic(target)),
                    })
                }
            }
        }
    }

    /// Write `value` to `name`.
    ///
    /// With `deref` true and `name` resolving through a symbolic chain, the
    /// write lands on the chain's terminal refname instead of `name` itself.
    pub fn update_ref(&self, name: &RefName, value: &RefValue, deref: bool) -> Result<(), RefError> {
        let target_name = if deref {
            self.terminal_name(name, 0)?
        } else {
            name.clone()
        };

        let path = target_name.to_path(&self.git_dir);
        if let Some(parent) = path.parent() {
            check_dir_file_conflict(parent)?;
            fs::create_dir_all(parent).map_err(|e| RefError::IoPath {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = match value {
            RefValue::Direct(oid) => format!("{}\n", oid.to_hex()),
            RefValue::Symbolic(target) => format!("ref: {target}\n"),
        };

        let mut lock = LockFile::acquire(&path)?;
        lock.write_all(content.as_bytes()).map_err(|e| RefError::IoPath {
            path: path.clone(),
            source: e,
        })?;
        lock.commit()?;
        Ok(())
    }

    /// Remove the terminal ref file that `name` resolves to.
    pub fn delete_ref(&self, name: &RefName, deref: bool) -> Result<(), RefError> {
        let target_name = if deref {
            self.terminal_name(name, 0)?
        } else {
            name.clone()
        };
        let path = target_name.to_path(&self.git_dir);
        fs::remove_file(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RefError::NotFound(target_name.to_string())
            } else {
                RefError::IoPath { path, source: e }
            }
        })
    }

    /// Enumerate every ref under `HEAD`, `MERGE_HEAD`, and `refs/`, filtered
    /// by `prefix`, each resolved according to `deref`.
    pub fn iter_refs(&self, prefix: &str, deref: bool) -> Result<Vec<(String, RefLookup)>, RefError> {
        let mut names = Vec::new();
        for pseudo in ["HEAD", "MERGE_HEAD"] {
            let path = self.git_dir.join(pseudo);
            if path.is_file() {
                names.push(RefName::new_unchecked(pseudo));
            }
        }
        let refs_dir = self.git_dir.join("refs");
        if refs_dir.is_dir() {
            walk_refs(&refs_dir, "refs", &mut names)?;
        }

        let mut out = Vec::new();
        for name in names {
            let display = name.to_string();
            if !display.starts_with(prefix) {
                continue;
            }
            let lookup = self.get_ref(&name, deref)?;
            out.push((display, lookup));
        }
        out.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(out)
    }
}

fn walk_refs(dir: &Path, prefix: &str, out: &mut Vec<RefName>) -> Result<(), RefError> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let file_name = entry.file_name();
        let name_str = file_name.to_string_lossy();
        let child_prefix = format!("{prefix}/{name_str}");

        if entry.file_type()?.is_dir() {
            walk_refs(&entry.path(), &child_prefix, out)?;
        } else {
            out.push(RefName::new_unchecked(child_prefix));
        }
    }
    Ok(())
}

/// Reject creating a ref when an existing ref file occupies a path
/// component that this ref needs to be a directory (e.g. `refs/heads/a`
/// exists as a file but we're creating `refs/heads/a/b`).
fn check_dir_file_conflict(parent: &Path) -> Result<(), RefError> {
    let mut path = PathBuf::new();
    for component in parent.components() {
        path.push(component);
        if path.is_file() {
            return Err(RefError::IoPath {
                path: path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "path component is an existing ref file",
                ),
            });
        }
    }
    Ok(())
}
