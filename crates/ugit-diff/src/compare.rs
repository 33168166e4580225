use std::collections::{BTreeMap, BTreeSet};

use ugit_hash::ObjectId;

/// Compare any number of flattened trees (`path → blob oid` maps). Yields
/// one row per path present in any tree, with `None` where that tree lacks
/// the path.
pub fn compare_trees(
    trees: &[&BTreeMap<String, ObjectId>],
) -> Vec<(String, Vec<Option<ObjectId>>)> {
    let mut paths: BTreeSet<&str> = BTreeSet::new();
    for tree in trees {
        paths.extend(tree.keys().map(String::as_str));
    }

    paths
        .into_iter()
        .map(|path| {
            let oids = trees.iter().map(|tree| tree.get(path).copied()).collect();
            (path.to_string(), oids)
        })
        .collect()
}

/// How a path changed between two trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
}

/// Paths whose blob oid differs between `from` and `to`.
pub fn iter_changed_files(
    from: &BTreeMap<String, ObjectId>,
    to: &BTreeMap<String, ObjectId>,
) -> Vec<(String, ChangeKind)> {
    compare_trees(&[from, to])
        .into_iter()
        .filter_map(|(path, oids)| {
            let (o_from, o_to) = (oids[0], oids[1]);
            if o_from == o_to {
                return None;
            }
            let kind = match (o_from, o_to) {
                (None, Some(_)) => ChangeKind::Added,
                (Some(_), None) => ChangeKind::Deleted,
                _ => ChangeKind::Modified,
            };
            Some((path, kind))
        })
        .collect()
}
