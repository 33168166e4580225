use anyhow::Result;
use clap::Args;
use ugit_object::ObjectType;

use super::open_repo;

#[derive(Args)]
pub struct HashObjectArgs {
    /// The file to hash
    file: String,
}

pub fn run(args: &HashObjectArgs) -> Result<i32> {
    let repo = open_repo()?;
    let data = std::fs::read(&args.file)?;
    let oid = repo.store().hash_object(ObjectType::Blob, &data)?;
    println!("{}", oid.to_hex());
    Ok(0)
}
