use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct PushArgs {
    /// Path to the remote repository
    path: PathBuf,

    /// The branch to push
    branch: String,
}

pub fn run(args: &PushArgs) -> Result<i32> {
    let repo = open_repo()?;
    let refname = format!("refs/heads/{}", args.branch);
    ugit_sync::push(&repo, &args.path, &refname)?;
    Ok(0)
}
