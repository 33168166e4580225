use anyhow::Result;
use clap::Args;
use ugit_repo::Repo;

#[derive(Args)]
pub struct InitArgs {}

pub fn run(_args: &InitArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let repo = Repo::init(&cwd)?;
    println!("Initialized empty ugit repository in {}", repo.ugit_dir().display());
    Ok(0)
}
