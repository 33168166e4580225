use std::path::Path;

use ugit_hash::ObjectId;
use ugit_history::iter_objects_in_commits;
use ugit_ref::{RefName, RefValue};
use ugit_repo::Repo;

use crate::error::SyncError;
use crate::{LOCAL_REMOTE_PREFIX, REMOTE_HEADS_PREFIX};

/// Copy every object reachable from the remote's branch heads into
/// `local`, then mirror those heads into `refs/remote/<name>`.
///
/// Idempotent: objects already present locally are skipped, and
/// re-running against an unchanged remote reproduces the same local
/// state.
pub fn fetch(local: &Repo, remote_path: impl AsRef<Path>) -> Result<(), SyncError> {
    let remote = Repo::open(remote_path);
    let heads = remote_heads(&remote)?;

    let seeds: Vec<ObjectId> = heads.iter().map(|(_, oid)| *oid).collect();
    for oid in iter_objects_in_commits(&remote, seeds)? {
        local.store().copy_object_from(&oid, remote.store())?;
    }

    for (name, oid) in heads {
        let local_name = RefName::new(format!("{LOCAL_REMOTE_PREFIX}{name}"))?;
        local.refs().update_ref(&local_name, &RefValue::Direct(oid), false)?;
    }
    Ok(())
}

fn remote_heads(remote: &Repo) -> Result<Vec<(String, ObjectId)>, SyncError> {
    let mut out = Vec::new();
    for (name, lookup) in remote.refs().iter_refs(REMOTE_HEADS_PREFIX, true)? {
        if let Some(RefValue::Direct(oid)) = lookup.value {
            let short = name.strip_prefix(REMOTE_HEADS_PREFIX).unwrap_or(&name).to_string();
            out.push((short, oid));
        }
    }
    Ok(out)
}
