use ugit_hash::ObjectId;
use ugit_ref::{RefName, RefValue};
use ugit_repo::Repo;

use crate::HistoryError;

/// Resolve `name` to an OID.
///
/// `@` is an alias for `HEAD`. Tries, in order, `<name>`, `refs/<name>`,
/// `refs/tags/<name>`, `refs/heads/<name>`, returning the first that
/// resolves to a direct OID. Failing that, accepts `name` as a literal
/// 40-hex-digit OID. Otherwise fails with [`HistoryError::UnknownName`].
pub fn resolve_name(repo: &Repo, name: &str) -> Result<ObjectId, HistoryError> {
    let name = if name == "@" { "HEAD" } else { name };

    for candidate in [
        name.to_string(),
        format!("refs/{name}"),
        format!("refs/tags/{name}"),
        format!("refs/heads/{name}"),
    ] {
        if let Some(oid) = try_ref(repo, &candidate)? {
            return Ok(oid);
        }
    }

    if ObjectId::looks_like_oid(name) {
        return Ok(ObjectId::from_hex(name)?);
    }

    Err(HistoryError::UnknownName(name.to_string()))
}

fn try_ref(repo: &Repo, candidate: &str) -> Result<Option<ObjectId>, HistoryError> {
    let Ok(ref_name) = RefName::new(candidate) else {
        return Ok(None);
    };
    let lookup = repo.refs().get_ref(&ref_name, true)?;
    Ok(match lookup.value {
        Some(RefValue::Direct(oid)) => Some(oid),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ugit_ref::RefValue;
    use std::fs;

    fn oid(n: u8) -> ObjectId {
        let mut hex = format!("{n:02x}");
        hex.push_str(&"0".repeat(40 - hex.len()));
        ObjectId::from_hex(&hex).unwrap()
    }

    #[test]
    fn at_sign_resolves_head() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"x\n").unwrap();
        let c1 = repo.commit("first").unwrap();

        assert_eq!(resolve_name(&repo, "@").unwrap(), c1);
    }

    #[test]
    fn resolves_branch_name() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let branch = RefName::new("refs/heads/feature").unwrap();
        repo.refs().update_ref(&branch, &RefValue::Direct(oid(1)), true).unwrap();

        assert_eq!(resolve_name(&repo, "feature").unwrap(), oid(1));
    }

    #[test]
    fn resolves_tag_name() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let tag = RefName::new("refs/tags/v1").unwrap();
        repo.refs().update_ref(&tag, &RefValue::Direct(oid(2)), true).unwrap();

        assert_eq!(resolve_name(&repo, "v1").unwrap(), oid(2));
    }

    #[test]
    fn accepts_literal_oid() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let hex = oid(3).to_hex();
        assert_eq!(resolve_name(&repo, &hex).unwrap(), oid(3));
    }

    #[test]
    fn unknown_name_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        assert!(matches!(
            resolve_name(&repo, "nonexistent"),
            Err(HistoryError::UnknownName(_))
        ));
    }
}
