//! Layout compilation and lookup with MiniJinja.
//!
//! A templates tree has two flat directories: `layouts/` with one file per page
//! kind and `includes/` with fragments shared by all layouts. Every layout is
//! compiled into its own environment together with all includes, which are
//! registered under their file names (`{% include "header.html" %}`).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use minijinja::{Environment, Template};
use walkdir::WalkDir;

use crate::constants::{INCLUDES_DIR, LAYOUTS_DIR, TEMPLATE_SUFFIX};
use crate::error::{Error, Result};

/// Registry key of the layout a page names in its `template` field.
pub fn template_key(name: &str) -> String {
    format!("{name}{TEMPLATE_SUFFIX}")
}

/// Compiled layouts indexed by layout file name. Read-only once built.
pub struct TemplateRegistry {
    layouts: BTreeMap<String, Environment<'static>>,
}

/// Regular files directly inside `dir`, sorted by name. A missing directory is empty.
fn list_files(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for dir_entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = dir_entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_str().ok_or_else(|| {
            Error::InvalidPath(format!("'{}' is not UTF-8", entry.path().display()))
        })?;
        files.push((name.to_string(), entry.path().to_path_buf()));
    }
    Ok(files)
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::file("read template", path, e))
}

impl TemplateRegistry {
    /// Compiles every layout under `templates_dir/layouts` with all includes
    /// under `templates_dir/includes`.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if any layout or include fails to compile;
    ///   no partial registry is returned
    pub fn build<P: AsRef<Path>>(templates_dir: P) -> Result<Self> {
        let templates_dir = templates_dir.as_ref();

        let includes = list_files(&templates_dir.join(INCLUDES_DIR))?
            .into_iter()
            .map(|(name, path)| Ok((name, read_source(&path)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut layouts = BTreeMap::new();
        for (name, path) in list_files(&templates_dir.join(LAYOUTS_DIR))? {
            let mut env = Environment::new();
            for (include_name, include_source) in &includes {
                env.add_template_owned(include_name.clone(), include_source.clone())?;
            }
            env.add_template_owned(name.clone(), read_source(&path)?)?;
            debug!("Compiled layout '{}' with {} include(s)", name, includes.len());
            layouts.insert(name, env);
        }

        Ok(Self { layouts })
    }

    /// Looks up the compiled layout registered under `key` (e.g. `page.html`).
    pub fn lookup(&self, key: &str) -> Option<Template<'_, '_>> {
        self.layouts.get(key).and_then(|env| env.get_template(key).ok())
    }

    /// Registered layout keys in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}
