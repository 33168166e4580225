//! Tree diffing and three-way merging.
//!
//! Trees are compared purely by path and blob oid; actual line-level diffing
//! and merging is delegated to the system `diff`/`diff3` binaries, matching
//! the working tree's on-disk contents rather than reimplementing an edit
//! distance algorithm.

mod compare;
mod diff;
mod error;
mod merge;

pub use compare::{compare_trees, iter_changed_files, ChangeKind};
pub use diff::diff_trees;
pub use error::DiffError;
pub use merge::{merge, merge_trees, MergeOutcome};
