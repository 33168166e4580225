use anyhow::Result;
use clap::Args;
use ugit_history::resolve_name;

use super::open_repo;

#[derive(Args)]
pub struct ResetArgs {
    /// The commit to reset HEAD to
    commit: String,
}

pub fn run(args: &ResetArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve_name(&repo, &args.commit)?;
    ugit_history::reset(&repo, oid)?;
    println!("HEAD reset to {}", &oid.to_hex()[..10]);
    Ok(0)
}
