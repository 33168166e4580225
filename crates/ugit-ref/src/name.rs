use std::fmt;
use std::path::PathBuf;

use bstr::{BStr, BString, ByteSlice};

use crate::error::RefError;

/// A validated reference name, always using `/` separators regardless of
/// host OS.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefName(BString);

/// Characters forbidden anywhere in a ref name.
const FORBIDDEN_CHARS: &[u8] = b" ~^:?*[\\";

/// Names valid without a `refs/` prefix.
const SPECIAL_REFS: &[&str] = &["HEAD", "MERGE_HEAD"];

impl RefName {
    /// Create and validate a ref name.
    pub fn new(name: impl Into<BString>) -> Result<Self, RefError> {
        let name = name.into();
        validate_ref_name(&name)?;
        Ok(Self(name))
    }

    pub(crate) fn new_unchecked(name: impl Into<BString>) -> Self {
        Self(name.into())
    }

    pub fn as_bstr(&self) -> &BStr {
        self.0.as_bstr()
    }

    /// The short name, e.g. `main` from `refs/heads/main`.
    pub fn short_name(&self) -> &BStr {
        let s = self.0.as_bstr();
        if let Some(rest) = s.strip_prefix(b"refs/heads/") {
            rest.as_bstr()
        } else if let Some(rest) = s.strip_prefix(b"refs/tags/") {
            rest.as_bstr()
        } else {
            s
        }
    }

    /// Map to a filesystem path under `git_dir`, using host path separators.
    pub fn to_path(&self, git_dir: &std::path::Path) -> PathBuf {
        let mut path = git_dir.to_path_buf();
        for component in self.0.split_str("/") {
            path.push(component.to_str_lossy().into_owned());
        }
        path
    }
}

impl fmt::Display for RefName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_str_lossy())
    }
}

fn validate_ref_name(name: &BString) -> Result<(), RefError> {
    let s = name.as_bstr();

    if s.is_empty() {
        return Err(RefError::InvalidName("empty ref name".into()));
    }
    if s.contains_str("..") {
        return Err(RefError::InvalidName(format!("{s}: contains '..'")));
    }
    if s.starts_with(b"/") || s.ends_with(b"/") || s.contains_str("//") {
        return Err(RefError::InvalidName(format!("{s}: malformed slashes")));
    }
    if s.ends_with(b".") {
        return Err(RefError::InvalidName(format!("{s}: ends with '.'")));
    }
    if s.ends_with(b".lock") {
        return Err(RefError::InvalidName(format!("{s}: ends with '.lock'")));
    }
    if s.contains_str("@{") {
        return Err(RefError::InvalidName(format!("{s}: contains '@{{'")));
    }
    if s.iter().any(|&b| b < 0x20 || b == 0x7f || FORBIDDEN_CHARS.contains(&b)) {
        return Err(RefError::InvalidName(format!("{s}: contains forbidden character")));
    }

    let str_name = s.to_str().map_err(|_| RefError::InvalidName("not valid UTF-8".into()))?;
    if !SPECIAL_REFS.contains(&str_name) && !str_name.contains('/') {
        return Err(RefError::InvalidName(format!("{str_name}: must be under refs/")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_head_and_full_refs() {
        assert!(RefName::new("HEAD").is_ok());
        assert!(RefName::new("refs/heads/main").is_ok());
    }

    #[test]
    fn rejects_bare_name_without_slash() {
        assert!(RefName::new("main").is_err());
    }

    #[test]
    fn rejects_double_dot() {
        assert!(RefName::new("refs/heads/../etc").is_err());
    }

    #[test]
    fn rejects_lock_suffix() {
        assert!(RefName::new("refs/heads/main.lock").is_err());
    }

    #[test]
    fn short_name_strips_refs_heads() {
        let name = RefName::new("refs/heads/main").unwrap();
        assert_eq!(name.short_name(), "main");
    }

    #[test]
    fn to_path_uses_host_separators() {
        let name = RefName::new("refs/heads/main").unwrap();
        let path = name.to_path(std::path::Path::new("/repo/.ugit"));
        assert_eq!(path, std::path::PathBuf::from("/repo/.ugit/refs/heads/main"));
    }
}
