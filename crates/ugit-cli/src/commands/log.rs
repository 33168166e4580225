use std::collections::HashMap;

use anyhow::Result;
use clap::Args;
use ugit_hash::ObjectId;
use ugit_history::{iter_commits_and_parents, resolve_name};

use super::open_repo;

#[derive(Args)]
pub struct LogArgs {
    /// The commit to start from
    #[arg(default_value = "@")]
    name: String,
}

pub fn run(args: &LogArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve_name(&repo, &args.name)?;

    let mut refs_by_oid: HashMap<ObjectId, Vec<String>> = HashMap::new();
    for (name, lookup) in repo.refs().iter_refs("refs/", true)? {
        if let Some(ugit_ref::RefValue::Direct(target)) = lookup.value {
            let short = name
                .strip_prefix("refs/heads/")
                .or_else(|| name.strip_prefix("refs/tags/"))
                .unwrap_or(&name);
            refs_by_oid.entry(target).or_default().push(short.to_string());
        }
    }
    let head_name = ugit_ref::RefName::new("HEAD").expect("HEAD is a valid ref name");
    if let Some(ugit_ref::RefValue::Direct(head_oid)) = repo.refs().get_ref(&head_name, true)?.value {
        refs_by_oid.entry(head_oid).or_default().push("HEAD".to_string());
    }

    for commit_oid in iter_commits_and_parents(&repo, [oid]) {
        let commit_oid = commit_oid?;
        let commit = repo.get_commit(&commit_oid)?;

        let decoration = refs_by_oid
            .get(&commit_oid)
            .map(|names| format!(" ({})", names.join(", ")))
            .unwrap_or_default();
        println!("commit {}{}", commit_oid.to_hex(), decoration);
        println!();
        let message = String::from_utf8_lossy(&commit.message);
        for line in message.lines() {
            println!("    {line}");
        }
        println!();
    }

    Ok(0)
}
