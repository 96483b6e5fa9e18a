//! Pure path algebra for the build pipeline.
//!
//! Extension helpers work on the string form of a path and never touch the
//! file system. An extension starts at the first dot of the final segment that
//! is not the segment's leading character, so `x.tar.gz` has `.tar.gz`,
//! `types.d.ts` has `.d.ts` and the hidden file `.nojekyll` has none. A name
//! without an extension yields an empty string, and [`change_extension`] then
//! appends the new extension to the full name (`README` becomes `README.html`).

use std::path::{Path, PathBuf};

use crate::constants::{DOCUMENT_EXTENSION, PAGE_EXTENSION};
use crate::error::{Error, Result};

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Returns the dotted suffix of the final path segment, or `""` if it has none.
pub fn extension_of(path: &str) -> &str {
    let name = file_name(path);
    if name == ".." {
        return "";
    }
    // A leading dot marks a hidden file, not an extension.
    let first = name.chars().next().map_or(0, char::len_utf8);
    match name[first..].find('.') {
        Some(index) => &name[first + index..],
        None => "",
    }
}

/// Strips exactly the suffix returned by [`extension_of`].
pub fn remove_extension(path: &str) -> &str {
    &path[..path.len() - extension_of(path).len()]
}

/// Replaces the extension of `path` with `new_extension` (which carries its own dot).
pub fn change_extension(path: &str, new_extension: &str) -> String {
    format!("{}{}", remove_extension(path), new_extension)
}

/// Whether `path` is a content document rendered through a template.
/// Extensionless files are never documents.
pub fn is_document<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| extension_of(name) == DOCUMENT_EXTENSION)
}

/// Rewrites the `from_root` prefix of `path` into `to_root`.
///
/// # Errors
/// * `Error::InvalidPath` if `path` is not located under `from_root`
pub fn rebase<P, F, T>(path: P, from_root: F, to_root: T) -> Result<PathBuf>
where
    P: AsRef<Path>,
    F: AsRef<Path>,
    T: AsRef<Path>,
{
    let path = path.as_ref();
    let relative = path.strip_prefix(from_root.as_ref()).map_err(|_| {
        Error::InvalidPath(format!(
            "'{}' is not under '{}'",
            path.display(),
            from_root.as_ref().display()
        ))
    })?;
    Ok(to_root.as_ref().join(relative))
}

/// Maps a content document to its rendered page, e.g.
/// `content/a/b.md` to `public/a/b.html`.
pub fn page_destination<P, C, O>(source: P, content_root: C, output_root: O) -> Result<PathBuf>
where
    P: AsRef<Path>,
    C: AsRef<Path>,
    O: AsRef<Path>,
{
    let rebased = rebase(source, content_root, output_root)?;
    let rebased = rebased
        .to_str()
        .ok_or_else(|| Error::InvalidPath(format!("'{}' is not UTF-8", rebased.display())))?;
    Ok(PathBuf::from(change_extension(rebased, PAGE_EXTENSION)))
}
