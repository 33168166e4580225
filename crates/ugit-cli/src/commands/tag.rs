use anyhow::Result;
use clap::Args;
use ugit_history::resolve_name;

use super::open_repo;

#[derive(Args)]
pub struct TagArgs {
    /// The tag name
    name: String,

    /// The commit to tag
    #[arg(default_value = "@")]
    oid: String,
}

pub fn run(args: &TagArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve_name(&repo, &args.oid)?;
    ugit_history::create_tag(&repo, &args.name, oid)?;
    Ok(0)
}
