use anyhow::Result;
use clap::Args;
use ugit_diff::MergeOutcome;
use ugit_history::resolve_name;

use super::open_repo;

#[derive(Args)]
pub struct MergeArgs {
    /// The branch or commit to merge into HEAD
    name: String,
}

pub fn run(args: &MergeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve_name(&repo, &args.name)?;

    match ugit_diff::merge(&repo, oid)? {
        MergeOutcome::FastForward => println!("Fast-forward"),
        MergeOutcome::Merged => {
            println!("Merged; commit the result to conclude the merge.");
        }
    }
    Ok(0)
}
