//! The working-tree ignore set: path components that are never part of
//! a tree snapshot, diff, or checkout.

/// Basenames excluded from every working-tree walk.
pub const IGNORED_NAMES: &[&str] = &[".ugit", ".git", ".venv"];

/// Does any component of `path` match an ignored basename?
pub fn is_ignored(path: &std::path::Path) -> bool {
    path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .map(|s| IGNORED_NAMES.contains(&s))
            .unwrap_or(false)
    })
}
