//! The object model: blob, tree, and commit parsing and serialization.
//!
//! Objects are persisted as `kind‖0x00‖payload` — framing is the object
//! store's job (see `ugit-store`). This crate deals only in payload bytes.

mod blob;
mod commit;
mod tree;

pub use blob::Blob;
pub use commit::Commit;
pub use tree::{EntryKind, Tree, TreeEntry};

use bstr::BString;

/// Errors produced while parsing or validating object payloads.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("invalid object kind: {0}")]
    InvalidKind(BString),

    #[error("invalid tree entry at offset {offset}: {reason}")]
    InvalidTreeEntry { offset: usize, reason: String },

    #[error("tree entry name invalid: {0:?}")]
    InvalidEntryName(BString),

    #[error("commit missing required '{field}' header")]
    MissingCommitField { field: &'static str },

    #[error("commit has unknown header '{0}'")]
    UnknownCommitHeader(BString),

    #[error(transparent)]
    Hash(#[from] ugit_hash::HashError),
}

/// The three kinds of objects the store knows how to frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        match s {
            b"blob" => Ok(Self::Blob),
            b"tree" => Ok(Self::Tree),
            b"commit" => Ok(Self::Commit),
            _ => Err(ObjectError::InvalidKind(BString::from(s))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectType {
    type Err = ObjectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}
