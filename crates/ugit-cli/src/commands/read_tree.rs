use anyhow::Result;
use clap::Args;
use ugit_history::resolve_name;

use super::open_repo;

#[derive(Args)]
pub struct ReadTreeArgs {
    /// The tree to read into the working directory
    tree: String,
}

pub fn run(args: &ReadTreeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve_name(&repo, &args.tree)?;
    repo.read_tree(&oid)?;
    Ok(0)
}
