use std::path::PathBuf;

/// Error types for reference operations.
#[derive(Debug, thiserror::Error)]
pub enum RefError {
    #[error("invalid ref name: {0}")]
    InvalidName(String),

    #[error("ref not found: {0}")]
    NotFound(String),

    #[error("symbolic ref chain for {0} exceeds the maximum recursion depth")]
    RefCycle(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("lock file error: {0}")]
    Lock(#[from] ugit_utils::LockError),

    #[error("I/O error on {path}: {source}")]
    IoPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Hash(#[from] ugit_hash::HashError),
}
