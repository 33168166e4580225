use anyhow::Result;
use clap::Args;
use ugit_history::{create_branch, get_branch_name, iter_branch_names, resolve_name};

use super::open_repo;

#[derive(Args)]
pub struct BranchArgs {
    /// The new branch's name
    name: Option<String>,

    /// The commit the new branch should start at
    #[arg(default_value = "@")]
    start_point: String,
}

pub fn run(args: &BranchArgs) -> Result<i32> {
    let repo = open_repo()?;

    let Some(name) = &args.name else {
        let current = get_branch_name(&repo)?;
        for branch in iter_branch_names(&repo)? {
            let marker = if Some(&branch) == current.as_ref() { "* " } else { "  " };
            println!("{marker}{branch}");
        }
        return Ok(0);
    };

    let oid = resolve_name(&repo, &args.start_point)?;
    create_branch(&repo, name, oid)?;
    println!("Branch {name} created at {}", &oid.to_hex()[..10]);
    Ok(0)
}
