//! Exclusion rules for every tree the pipeline walks.
//!
//! A path is excluded when it lies in a version control directory, contains the
//! `IGNORE` marker, lies in the editor directory (when enabled), or matches a
//! pattern of the project `.grafeignore` file. Paths are matched relative to
//! the root being walked.

use std::fs::read_to_string;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

use crate::constants::{EDITOR_DIR, IGNORE_MARKER, VCS_DIRS};
use crate::error::{Error, Result};

/// Reads the ignore file and compiles its patterns into a [`GlobSet`].
///
/// # Notes
/// - A missing file yields an empty set
/// - Blank lines and lines starting with `#` are skipped
/// - Invalid patterns result in `Error::IgnoreError`
///
/// # Example
/// ```ignore
/// # Contents of .grafeignore:
/// *.psd
/// drafts/**
/// ```
pub fn parse_ignore_file<P: AsRef<Path>>(ignore_path: P) -> Result<GlobSet> {
    let ignore_path = ignore_path.as_ref();
    let mut builder = GlobSetBuilder::new();
    if let Ok(contents) = read_to_string(ignore_path) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            builder.add(Glob::new(line).map_err(|e| {
                Error::IgnoreError(format!("{} loading failed: {}", ignore_path.display(), e))
            })?);
        }
    } else {
        debug!("{} does not exist", ignore_path.display());
    }
    builder
        .build()
        .map_err(|e| Error::IgnoreError(format!("{} loading failed: {}", ignore_path.display(), e)))
}

/// Predicates deciding which files never reach the output tree.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    ignore_editor_dir: bool,
    patterns: GlobSet,
}

impl ExclusionRules {
    pub fn new(ignore_editor_dir: bool) -> Self {
        Self { ignore_editor_dir, patterns: GlobSet::empty() }
    }

    /// Adds project patterns, usually from [`parse_ignore_file`].
    pub fn with_patterns(mut self, patterns: GlobSet) -> Self {
        self.patterns = patterns;
        self
    }

    /// Whether `relative` (a path relative to the walked root) is excluded.
    pub fn is_excluded<P: AsRef<Path>>(&self, relative: P) -> bool {
        let relative = relative.as_ref();
        has_component(relative, &VCS_DIRS)
            || relative.to_string_lossy().contains(IGNORE_MARKER)
            || (self.ignore_editor_dir && has_component(relative, &[EDITOR_DIR]))
            || self.patterns.is_match(relative)
    }
}

fn has_component(path: &Path, names: &[&str]) -> bool {
    path.components()
        .any(|c| c.as_os_str().to_str().is_some_and(|name| names.contains(&name)))
}
