use std::path::PathBuf;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("not a ugit repository (or any of the parent directories): {0}")]
    NotFound(PathBuf),

    #[error("repository already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("malformed object: {0}")]
    MalformedObject(String),

    #[error("unknown name: {0}")]
    UnknownName(String),

    #[error(transparent)]
    Store(#[from] ugit_store::StoreError),

    #[error(transparent)]
    Object(#[from] ugit_object::ObjectError),

    #[error(transparent)]
    Ref(#[from] ugit_ref::RefError),

    #[error(transparent)]
    Hash(#[from] ugit_hash::HashError),

    #[error(transparent)]
    Util(#[from] ugit_utils::UtilError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
