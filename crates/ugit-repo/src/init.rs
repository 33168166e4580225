use std::fs;
use std::path::{Path, PathBuf};

use crate::RepoError;

pub const UGIT_DIR_NAME: &str = ".ugit";
const DEFAULT_BRANCH: &str = "main";

/// Create the `.ugit/` structure under `work_dir`: `objects/`, `refs/heads/`,
/// `refs/tags/`, and a `HEAD` symbolic ref pointing at the default branch.
///
/// Re-running on an existing repository is a safe no-op; existing data is
/// never overwritten.
pub fn init_repository(work_dir: &Path) -> Result<PathBuf, RepoError> {
    let work_dir = if work_dir.is_relative() {
        std::env::current_dir()?.join(work_dir)
    } else {
        work_dir.to_path_buf()
    };
    let ugit_dir = work_dir.join(UGIT_DIR_NAME);

    if ugit_dir.join("HEAD").is_file() {
        return Ok(ugit_dir);
    }

    fs::create_dir_all(ugit_dir.join("objects"))?;
    fs::create_dir_all(ugit_dir.join("refs").join("heads"))?;
    fs::create_dir_all(ugit_dir.join("refs").join("tags"))?;

    fs::write(
        ugit_dir.join("HEAD"),
        format!("ref: refs/heads/{DEFAULT_BRANCH}\n"),
    )?;

    Ok(ugit_dir)
}
