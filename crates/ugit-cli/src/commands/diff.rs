use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use ugit_diff::diff_trees;
use ugit_history::resolve_name;

use super::open_repo;

#[derive(Args)]
pub struct DiffArgs {
    /// Compare the index against the commit instead of the working tree
    #[arg(long)]
    cached: bool,

    /// The commit to diff against
    #[arg(default_value = "@")]
    commit: String,
}

pub fn run(args: &DiffArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve_name(&repo, &args.commit)?;
    let commit = repo.get_commit(&oid)?;
    let from = repo.get_tree(&commit.tree, "")?;

    let to = if args.cached {
        let index = repo.load_index()?;
        index.entries().clone()
    } else {
        repo.get_working_tree()?
    };
    let diff = diff_trees(repo.store(), &from, &to)?;
    io::stdout().write_all(&diff)?;
    Ok(0)
}
