//! Recursive file enumeration shared by every stage that reads a tree.

use std::path::Path;

use clap::ValueEnum;
use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// What to do with a directory entry that cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum WalkPolicy {
    /// Log a warning and skip the entry (and its subtree)
    #[default]
    Warn,
    /// Abort the walk with [`Error::WalkError`]
    Fail,
}

/// Calls `visit` for every non-directory entry below `root`.
///
/// Entries are yielded sorted by file name within each directory. A missing
/// root yields nothing. Errors returned by `visit` abort the walk.
///
/// # Returns
/// * `Result<usize>` - Number of files visited
pub fn walk<P, F>(root: P, policy: WalkPolicy, mut visit: F) -> Result<usize>
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> Result<()>,
{
    let root = root.as_ref();
    if !root.is_dir() {
        debug!("Nothing to walk in '{}'.", root.display());
        return Ok(0);
    }

    let mut visited = 0;
    for dir_entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match dir_entry {
            Ok(entry) => entry,
            Err(e) => match policy {
                WalkPolicy::Warn => {
                    warn!("Skipping unreadable entry under '{}': {}", root.display(), e);
                    continue;
                }
                WalkPolicy::Fail => return Err(Error::WalkError(e)),
            },
        };
        if entry.file_type().is_dir() {
            continue;
        }
        visit(entry.path())?;
        visited += 1;
    }
    Ok(visited)
}
