//! Byte-for-byte asset copies.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::ignore::ExclusionRules;
use crate::path::rebase;
use crate::walker::{walk, WalkPolicy};

/// Streams `source` into `dest`, creating missing ancestors of `dest`.
/// An existing `dest` is overwritten.
pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, dest: Q) -> Result<()> {
    let (source, dest) = (source.as_ref(), dest.as_ref());
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::file("create directory", parent, e))?;
    }

    let mut reader = File::open(source).map_err(|e| Error::file("open", source, e))?;
    let mut writer = File::create(dest).map_err(|e| Error::file("create", dest, e))?;
    io::copy(&mut reader, &mut writer).map_err(|e| Error::file("copy", source, e))?;
    Ok(())
}

/// Copies every non-excluded file under `source_root` to the same relative
/// path under `dest_root`.
///
/// # Returns
/// * `Result<usize>` - Number of files copied
pub fn mirror_tree<P: AsRef<Path>, Q: AsRef<Path>>(
    source_root: P,
    dest_root: Q,
    rules: &ExclusionRules,
    policy: WalkPolicy,
) -> Result<usize> {
    let (source_root, dest_root) = (source_root.as_ref(), dest_root.as_ref());
    let mut copied = 0;

    walk(source_root, policy, |path| {
        let relative = path.strip_prefix(source_root).unwrap_or(path);
        if rules.is_excluded(relative) {
            debug!("Skipping excluded file '{}'", path.display());
            return Ok(());
        }
        let target = rebase(path, source_root, dest_root)?;
        debug!("Copying '{}' to '{}'", path.display(), target.display());
        copy_file(path, &target)?;
        copied += 1;
        Ok(())
    })?;

    Ok(copied)
}
