//! The reference store: loose ref files under `refs/`, plus the top-level
//! `HEAD` and `MERGE_HEAD` pseudo-refs.
//!
//! A ref file holds either a bare hex OID (a direct ref) or `ref: <name>`
//! (a symbolic ref). There is no packed-refs file and no reflog — every ref
//! is exactly one file.

mod error;
mod name;
mod store;

pub use error::RefError;
pub use name::RefName;
pub use store::{RefStore, RefValue};
