/// Errors produced by fetch/push.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("unknown ref: {0}")]
    UnknownRef(String),

    #[error("push rejected: remote has diverged from local (non-fast-forward)")]
    NonFastForward,

    #[error(transparent)]
    Repo(#[from] ugit_repo::RepoError),

    #[error(transparent)]
    Ref(#[from] ugit_ref::RefError),

    #[error(transparent)]
    Store(#[from] ugit_store::StoreError),

    #[error(transparent)]
    History(#[from] ugit_history::HistoryError),
}
