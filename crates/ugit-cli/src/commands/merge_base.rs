use anyhow::{bail, Result};
use clap::Args;
use ugit_history::{get_merge_base, resolve_name};

use super::open_repo;

#[derive(Args)]
pub struct MergeBaseArgs {
    commit1: String,
    commit2: String,
}

pub fn run(args: &MergeBaseArgs) -> Result<i32> {
    let repo = open_repo()?;
    let a = resolve_name(&repo, &args.commit1)?;
    let b = resolve_name(&repo, &args.commit2)?;

    match get_merge_base(&repo, a, b)? {
        Some(oid) => {
            println!("{}", oid.to_hex());
            Ok(0)
        }
        None => bail!("no common ancestor"),
    }
}
