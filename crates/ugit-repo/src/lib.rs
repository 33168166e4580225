//! Repository context, tree codec, commit codec, and the staging index.
//!
//! The active repository is ordinary process state: a [`Repo`] handle bound
//! to a working directory. [`context`] additionally provides the
//! process-wide "current repository" binding that remote-sync operations
//! rebind temporarily to read a peer repository as if it were local.

mod commit;
pub mod context;
mod error;
mod index;
mod init;
mod tree;

pub use error::RepoError;
pub use index::Index;

use std::path::{Path, PathBuf};

use ugit_ref::RefStore;
use ugit_store::ObjectStore;

/// A repository: a working directory with a `.ugit` control directory
/// holding the object store and ref store.
pub struct Repo {
    work_dir: PathBuf,
    ugit_dir: PathBuf,
    store: ObjectStore,
    refs: RefStore,
}

impl Repo {
    /// Open the repository rooted at `work_dir`. Does not require the
    /// `.ugit` directory to already exist — callers that need an existing
    /// repository should check [`Repo::exists`] first.
    pub fn open(work_dir: impl AsRef<Path>) -> Self {
        let work_dir = work_dir.as_ref().to_path_buf();
        let ugit_dir = work_dir.join(init::UGIT_DIR_NAME);
        Self {
            store: ObjectStore::open(ugit_dir.join("objects")),
            refs: RefStore::open(&ugit_dir),
            work_dir,
            ugit_dir,
        }
    }

    /// Initialize a new repository at `work_dir` and open it.
    pub fn init(work_dir: impl AsRef<Path>) -> Result<Self, RepoError> {
        init::init_repository(work_dir.as_ref())?;
        Ok(Self::open(work_dir))
    }

    /// Whether `.ugit` exists under `work_dir`.
    pub fn exists(work_dir: impl AsRef<Path>) -> bool {
        work_dir.as_ref().join(init::UGIT_DIR_NAME).join("HEAD").is_file()
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn ugit_dir(&self) -> &Path {
        &self.ugit_dir
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn refs(&self) -> &RefStore {
        &self.refs
    }

    fn index_path(&self) -> PathBuf {
        self.ugit_dir.join("index")
    }
}
