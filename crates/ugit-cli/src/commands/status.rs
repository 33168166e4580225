use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;
use ugit_diff::{iter_changed_files, ChangeKind};
use ugit_history::{get_branch_name, resolve_name};
use ugit_ref::{RefName, RefValue};

use super::open_repo;

#[derive(Args)]
pub struct StatusArgs {}

fn change_kind_label(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Added => "added",
        ChangeKind::Deleted => "deleted",
        ChangeKind::Modified => "modified",
    }
}

pub fn run(_args: &StatusArgs) -> Result<i32> {
    let repo = open_repo()?;

    match get_branch_name(&repo)? {
        Some(branch) => println!("On branch {branch}"),
        None => {
            let head_oid = resolve_name(&repo, "@")?;
            println!("HEAD detached at {}", &head_oid.to_hex()[..10]);
        }
    }

    let merge_head_name = RefName::new("MERGE_HEAD").expect("MERGE_HEAD is a valid ref name");
    if let Some(RefValue::Direct(oid)) = repo.refs().get_ref(&merge_head_name, false)?.value {
        println!("Merging with {}", &oid.to_hex()[..10]);
    }

    let head_tree = match resolve_name(&repo, "@") {
        Ok(oid) => {
            let commit = repo.get_commit(&oid)?;
            repo.get_tree(&commit.tree, "")?
        }
        Err(_) => BTreeMap::new(),
    };
    let working_tree = repo.get_working_tree()?;

    println!();
    println!("Changes to be committed:");
    println!();
    for (path, kind) in iter_changed_files(&head_tree, &working_tree) {
        println!("{:>12}: {path}", change_kind_label(kind));
    }

    Ok(0)
}
