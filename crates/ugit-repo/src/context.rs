//! The process-wide "current repository" binding.
//!
//! Most operations take a [`Repo`](crate::Repo) handle explicitly and never
//! touch this. It exists for the remote-sync boundary, which needs to read
//! a peer repository's refs "as if" it were the active one without
//! threading a second handle through every ref lookup.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

thread_local! {
    static CURRENT: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

/// The working directory of the currently bound repository, if any.
pub fn current() -> Option<PathBuf> {
    CURRENT.with(|c| c.borrow().clone())
}

/// Rebind the current repository to `work_dir` for the duration of `f`,
/// restoring the previous binding on every exit path — including panics,
/// since the guard's `Drop` runs during unwinding.
pub fn scoped<R>(work_dir: impl AsRef<Path>, f: impl FnOnce() -> R) -> R {
    let _guard = Scope::enter(work_dir);
    f()
}

struct Scope {
    previous: Option<PathBuf>,
}

impl Scope {
    fn enter(work_dir: impl AsRef<Path>) -> Self {
        let previous = CURRENT.with(|c| c.replace(Some(work_dir.as_ref().to_path_buf())));
        Self { previous }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        CURRENT.with(|c| *c.borrow_mut() = self.previous.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_restores_previous_binding_on_exit() {
        assert_eq!(current(), None);
        scoped("/repo/a", || {
            assert_eq!(current(), Some(PathBuf::from("/repo/a")));
        });
        assert_eq!(current(), None);
    }

    #[test]
    fn scoped_nests_lifo() {
        scoped("/repo/outer", || {
            scoped("/repo/inner", || {
                assert_eq!(current(), Some(PathBuf::from("/repo/inner")));
            });
            assert_eq!(current(), Some(PathBuf::from("/repo/outer")));
        });
    }

    #[test]
    fn scoped_restores_on_panic() {
        let result = std::panic::catch_unwind(|| {
            scoped("/repo/a", || {
                panic!("boom");
            });
        });
        assert!(result.is_err());
        assert_eq!(current(), None);
    }
}
