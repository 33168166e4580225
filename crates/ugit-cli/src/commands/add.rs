use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct AddArgs {
    /// Files or directories to stage
    paths: Vec<PathBuf>,
}

pub fn run(args: &AddArgs) -> Result<i32> {
    let repo = open_repo()?;
    repo.add(&args.paths)?;
    Ok(0)
}
