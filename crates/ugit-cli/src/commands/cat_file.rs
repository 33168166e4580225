use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use ugit_hash::ObjectId;
use ugit_history::resolve_name;

use super::open_repo;

#[derive(Args)]
pub struct CatFileArgs {
    /// The object to display, by name or OID
    object: String,
}

pub fn run(args: &CatFileArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid: ObjectId = resolve_name(&repo, &args.object)?;
    let content = repo.store().get_object(&oid, None)?;
    io::stdout().write_all(&content)?;
    Ok(0)
}
