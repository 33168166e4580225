//! Remote synchronization. A "remote" is the filesystem path of
//! another repository; there is no network transport.

mod error;
mod fetch;
mod push;

pub use error::SyncError;
pub use fetch::fetch;
pub use push::push;

/// Where a remote's branch heads live, and where fetched heads are
/// mirrored locally.
const REMOTE_HEADS_PREFIX: &str = "refs/heads/";
const LOCAL_REMOTE_PREFIX: &str = "refs/remote/";
