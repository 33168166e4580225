use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct WriteTreeArgs {}

pub fn run(_args: &WriteTreeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = repo.write_tree(repo.work_dir())?;
    println!("{}", oid.to_hex());
    Ok(0)
}
