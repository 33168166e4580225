pub mod add;
pub mod branch;
pub mod cat_file;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod fetch;
pub mod hash_object;
pub mod init;
pub mod log;
pub mod merge;
pub mod merge_base;
pub mod push;
pub mod read_tree;
pub mod reset;
pub mod show;
pub mod status;
pub mod tag;
pub mod write_tree;

use anyhow::Result;
use clap::Subcommand;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty repository in the current directory
    Init(init::InitArgs),
    /// Compute an object ID and optionally create a blob from a file
    HashObject(hash_object::HashObjectArgs),
    /// Provide content of a repository object
    CatFile(cat_file::CatFileArgs),
    /// Write the current directory as a tree object
    WriteTree(write_tree::WriteTreeArgs),
    /// Read a tree object into the working directory
    ReadTree(read_tree::ReadTreeArgs),
    /// Add file contents to the index
    Add(add::AddArgs),
    /// Record changes to the repository
    Commit(commit::CommitArgs),
    /// Show commit logs
    Log(log::LogArgs),
    /// Switch branches or restore a detached state
    Checkout(checkout::CheckoutArgs),
    /// Create a tag object
    Tag(tag::TagArgs),
    /// List or create branches
    Branch(branch::BranchArgs),
    /// Show the working tree status
    Status(status::StatusArgs),
    /// Reset HEAD to the specified state
    Reset(reset::ResetArgs),
    /// Show a commit
    Show(show::ShowArgs),
    /// Show changes between commits, commit and working tree, etc
    Diff(diff::DiffArgs),
    /// Join two development histories together
    Merge(merge::MergeArgs),
    /// Find the common ancestor of two commits
    MergeBase(merge_base::MergeBaseArgs),
    /// Download objects and refs from another repository
    Fetch(fetch::FetchArgs),
    /// Update a remote ref along with the objects it needs
    Push(push::PushArgs),
}

/// Open the repository rooted at the current directory.
pub fn open_repo() -> Result<ugit_repo::Repo> {
    let cwd = std::env::current_dir()?;
    if !ugit_repo::Repo::exists(&cwd) {
        anyhow::bail!("not a ugit repository: {}", cwd.display());
    }
    Ok(ugit_repo::Repo::open(cwd))
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Init(args) => init::run(args),
        Commands::HashObject(args) => hash_object::run(args),
        Commands::CatFile(args) => cat_file::run(args),
        Commands::WriteTree(args) => write_tree::run(args),
        Commands::ReadTree(args) => read_tree::run(args),
        Commands::Add(args) => add::run(args),
        Commands::Commit(args) => commit::run(args),
        Commands::Log(args) => log::run(args),
        Commands::Checkout(args) => checkout::run(args),
        Commands::Tag(args) => tag::run(args),
        Commands::Branch(args) => branch::run(args),
        Commands::Status(args) => status::run(args),
        Commands::Reset(args) => reset::run(args),
        Commands::Show(args) => show::run(args),
        Commands::Diff(args) => diff::run(args),
        Commands::Merge(args) => merge::run(args),
        Commands::MergeBase(args) => merge_base::run(args),
        Commands::Fetch(args) => fetch::run(args),
        Commands::Push(args) => push::run(args),
    }
}
