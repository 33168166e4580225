//! Foundation utilities shared by the ugit crates: error types, atomic
//! lock/temp files, subprocess invocation, and the working-tree ignore set.

pub mod error;
pub mod ignore;
pub mod lockfile;
pub mod subprocess;
pub mod tempfile;

pub use bstr::{BStr, BString, ByteSlice, ByteVec};
pub use error::{LockError, UtilError};

pub type Result<T> = std::result::Result<T, UtilError>;
