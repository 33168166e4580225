//! The history engine: name resolution, commit traversal, reachable-object
//! enumeration, merge-base computation, and branch/checkout/tag operations.
//!
//! All traversal is a plain BFS with a visited set and first-parent
//! preference in linear regions — every reachable commit is yielded
//! exactly once.

mod branch;
mod checkout;
mod merge_base;
mod resolve;
mod walk;

pub use branch::*;
pub use checkout::*;
pub use merge_base::*;
pub use resolve::resolve_name;
pub use walk::{iter_commits_and_parents, iter_objects_in_commits};

/// Errors produced by history operations.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("unknown name: {0}")]
    UnknownName(String),

    #[error(transparent)]
    Repo(#[from] ugit_repo::RepoError),

    #[error(transparent)]
    Ref(#[from] ugit_ref::RefError),

    #[error(transparent)]
    Store(#[from] ugit_store::StoreError),

    #[error(transparent)]
    Object(#[from] ugit_object::ObjectError),

    #[error(transparent)]
    Hash(#[from] ugit_hash::HashError),
}
