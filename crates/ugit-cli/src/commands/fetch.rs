use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct FetchArgs {
    /// Path to the remote repository
    path: PathBuf,
}

pub fn run(args: &FetchArgs) -> Result<i32> {
    let repo = open_repo()?;
    ugit_sync::fetch(&repo, &args.path)?;
    Ok(0)
}
