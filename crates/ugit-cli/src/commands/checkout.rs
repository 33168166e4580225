use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct CheckoutArgs {
    /// The branch or commit to switch to
    name: String,
}

pub fn run(args: &CheckoutArgs) -> Result<i32> {
    let repo = open_repo()?;
    ugit_history::checkout(&repo, &args.name)?;
    Ok(0)
}
