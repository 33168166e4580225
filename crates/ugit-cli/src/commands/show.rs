use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use ugit_diff::diff_trees;
use ugit_history::resolve_name;

use super::open_repo;

#[derive(Args)]
pub struct ShowArgs {
    /// The commit to show
    #[arg(default_value = "@")]
    oid: String,
}

pub fn run(args: &ShowArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve_name(&repo, &args.oid)?;
    let commit = repo.get_commit(&oid)?;

    println!("commit {}", oid.to_hex());
    println!();
    let message = String::from_utf8_lossy(&commit.message);
    for line in message.lines() {
        println!("    {line}");
    }
    println!();

    let parent_tree = match commit.first_parent() {
        Some(parent_oid) => {
            let parent = repo.get_commit(parent_oid)?;
            repo.get_tree(&parent.tree, "")?
        }
        None => BTreeMap::new(),
    };
    let tree = repo.get_tree(&commit.tree, "")?;

    let diff = diff_trees(repo.store(), &parent_tree, &tree)?;
    io::stdout().write_all(&diff)?;
    Ok(0)
}
