use ugit_hash::ObjectId;

/// Errors produced by tree diffing and merging.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("`{program}` exited with an unexpected status: {status:?}")]
    UnexpectedExit {
        program: &'static str,
        status: Option<i32>,
    },

    #[error(transparent)]
    Repo(#[from] ugit_repo::RepoError),

    #[error(transparent)]
    Store(#[from] ugit_store::StoreError),

    #[error(transparent)]
    Util(#[from] ugit_utils::UtilError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
